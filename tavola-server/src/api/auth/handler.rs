//! Authentication Handlers

use axum::extract::State;
use axum::response::Redirect;
use serde::Serialize;
use shared::models::{LoginRequest, StaffResponse};
use tower_cookies::Cookies;

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::auth::{self, CurrentStaff, DASHBOARD_PATH, LOGIN_PATH};
use crate::core::ServerState;
use crate::db::repository::staff;
use crate::security_log;
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Login page data; `username` refills the field after a failed attempt
#[derive(Debug, Default, Serialize)]
pub struct LoginView {
    username: Option<String>,
    error: Option<String>,
}

/// GET /staff/login
pub async fn login_page() -> ApiResponse<LoginView> {
    view("staff_login", LoginView::default())
}

/// POST /staff/login
pub async fn login(
    State(state): State<ServerState>,
    cookies: Cookies,
    FormOrJson(req): FormOrJson<LoginRequest>,
) -> AppResult<Redirect> {
    // never echo the password
    let echo = LoginView {
        username: Some(req.username.clone()),
        error: None,
    };

    let username = req.username.trim();
    if username.is_empty()
        || username.len() > MAX_SHORT_TEXT_LEN
        || req.password.len() > MAX_PASSWORD_LEN
    {
        return Err(with_form(AppError::invalid_credentials(), &echo));
    }

    let session = auth::authenticate(&state.pool, username, &req.password)
        .await
        .map_err(|e| with_form(e, &echo))?;

    let staff_id = session.staff_id;
    let token = state.sessions.insert(session);
    cookies.add(auth::session_cookie(token, state.config.session_cookie_secure));

    tracing::info!(staff_id, "Staff signed in");
    Ok(see_other(DASHBOARD_PATH))
}

/// GET|POST /staff/logout
pub async fn logout(
    State(state): State<ServerState>,
    cookies: Cookies,
    staff: CurrentStaff,
) -> Redirect {
    state.sessions.remove(&staff.token);
    cookies.remove(auth::removal_cookie());
    security_log!("INFO", "logout", staff_id = staff.id());
    see_other(LOGIN_PATH)
}

/// GET /staff/me
pub async fn me(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<ApiResponse<StaffResponse>> {
    let profile = staff::find_by_id(&state.pool, staff.id())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?;
    Ok(ApiResponse::success(profile))
}
