//! AppError and the response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every Tavola handler and workflow boundary
///
/// `details` carries machine-readable context: the offending `field`, the
/// conflicting id, or the submitted `form` so a page can be re-filled.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add one detail entry (last write wins)
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref()?.get(key)
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== 常用构造 ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// `resource` already exists (unique key collision)
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{resource} already exists"))
            .with_detail("resource", resource)
    }

    /// Write lost to a concurrent change
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorCode::SessionExpired)
    }

    /// Same error for unknown username and wrong password
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn role_required(role: impl Into<String>) -> Self {
        let role = role.into();
        Self::with_message(ErrorCode::RoleRequired, format!("{role} role required"))
            .with_detail("role", role)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    fn is_system(&self) -> bool {
        self.code.category() == ErrorCategory::System
    }
}

/// Response envelope
///
/// Success: `code = 0`, `data` set. Page routes put the view name in
/// `message`. Failure: non-zero `code`, `details` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::view("OK", data)
    }

    /// Page payload named after the view that renders it
    pub fn view(name: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: name.into(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 系统错误: 记录原始信息, 对外只返回通用文案
        if self.is_system() {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
            let generic = AppError::new(self.code);
            return (generic.http_status(), axum::Json(ApiResponse::error(&generic))).into_response();
        }
        (self.http_status(), axum::Json(ApiResponse::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn default_message_comes_from_code() {
        let err = AppError::new(ErrorCode::NoTableAvailable);
        assert_eq!(err.message, "Sorry, no tables available for this time slot.");
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert!(err.details.is_none());
    }

    #[test]
    fn details_accumulate() {
        let err = AppError::validation("Guests must be between 1 and 50")
            .with_detail("field", "guests")
            .with_detail("value", 0);
        assert_eq!(err.detail("field").unwrap(), "guests");
        assert_eq!(err.detail("value").unwrap(), 0);
        assert!(err.detail("form").is_none());
    }

    #[test]
    fn role_required_names_the_role() {
        let err = AppError::role_required("Manager");
        assert_eq!(err.code, ErrorCode::RoleRequired);
        assert_eq!(err.message, "Manager role required");
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn system_errors_hide_their_message() {
        let resp = AppError::database("disk I/O error at page 7").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let envelope = ApiResponse::<()>::error(&AppError::new(ErrorCode::DatabaseError));
        assert_eq!(envelope.message, "Database error");
    }

    #[test]
    fn view_envelope() {
        let page = ApiResponse::view("manage_orders", vec![1, 2]);
        assert!(page.is_success());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "manage_orders");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn error_envelope_carries_details() {
        let err = AppError::new(ErrorCode::ShiftOverlap).with_detail("conflicting_shift_id", 4);
        let envelope: ApiResponse<()> = err.into();
        assert!(!envelope.is_success());
        assert_eq!(envelope.code, Some(7202));
        assert_eq!(envelope.details.unwrap()["conflicting_shift_id"], 4);
    }
}
