//! Shared types for Tavola
//!
//! Common types used by the server and its clients: data models, status
//! enumerations, error codes, and response structures.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
