//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`ApiResponse`] - unified error and response types (from shared::error)
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - form date/time parsing into Unix millis
//! - [`validation`] - text length limits

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
