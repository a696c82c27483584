//! Repository Module
//!
//! Free functions over `&SqlitePool` (reads) or `&mut SqliteConnection`
//! (statements that must run inside a caller's transaction).

// Booking
pub mod customer;
pub mod reservation;

// Staff
pub mod staff;

// Menu & orders
pub mod menu_item;
pub mod order;

// Stock
pub mod inventory;
pub mod supplier;

// Scheduling
pub mod assignment;
pub mod shift;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return RepoError::Validation(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
