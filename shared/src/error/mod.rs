//! Errors shared by the Tavola server and its tests
//!
//! Every failure is an [`AppError`]: a numeric [`ErrorCode`], a message and
//! optional details. Handlers return it directly and axum turns it into an
//! [`ApiResponse`] with the matching status.
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ShiftOverlap).with_detail("conflicting_shift_id", 4);
//! assert_eq!(err.http_status().as_u16(), 409);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
