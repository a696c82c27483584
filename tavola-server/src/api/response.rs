//! View and redirect helpers

use axum::response::Redirect;
use serde::Serialize;

use crate::utils::{ApiResponse, AppError};

/// Page payload: the view name travels in `message`
pub fn view<T>(name: &'static str, data: T) -> ApiResponse<T> {
    ApiResponse::view(name, data)
}

/// `303 See Other` to `path`
pub fn see_other(path: &str) -> Redirect {
    Redirect::to(path)
}

/// Attach the submitted form to an error so the page can be re-filled
pub fn with_form<F: Serialize>(err: AppError, form: &F) -> AppError {
    match serde_json::to_value(form) {
        Ok(value) => err.with_detail("form", value),
        Err(_) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use http::StatusCode;

    #[test]
    fn test_see_other_is_303() {
        let resp = see_other("/staff/orders").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/staff/orders");
    }

    #[test]
    fn test_with_form_keeps_code() {
        #[derive(Serialize)]
        struct Echo {
            date: &'static str,
        }
        let err = with_form(AppError::validation("bad date"), &Echo { date: "2026-13-01" });
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap()["form"]["date"], "2026-13-01");
    }
}
