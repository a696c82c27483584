//! 认证中间件
//!
//! Session gate for `/staff/*` and the Manager role gate for shift management.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

use super::{CurrentStaff, LOGIN_PATH, SESSION_COOKIE, removal_cookie};
use crate::AppError;
use crate::core::ServerState;
use crate::security_log;

/// 会话中间件 - 要求员工登录
///
/// Resolves the `tavola_session` cookie and injects [`CurrentStaff`] into the
/// request extensions. Missing or expired sessions get `303 See Other` to
/// `/staff/login`; an expired cookie is cleared on the way out.
pub async fn require_session(
    State(state): State<ServerState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        security_log!("INFO", "session_missing", uri = req.uri().to_string());
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.sessions.get(&token) {
        Some(session) => {
            req.extensions_mut().insert(CurrentStaff { session, token });
            next.run(req).await
        }
        None => {
            security_log!("WARN", "session_invalid", uri = req.uri().to_string());
            cookies.remove(removal_cookie());
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// 经理中间件 - 要求 Manager 角色
///
/// Must run inside [`require_session`]. Non-managers get 403 `RoleRequired`.
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let Some(staff) = req.extensions().get::<CurrentStaff>() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    if !staff.is_manager() {
        security_log!(
            "WARN",
            "manager_required",
            staff_id = staff.id(),
            staff_name = staff.name().to_string(),
            staff_role = staff.role().as_str(),
            uri = req.uri().to_string()
        );
        return Err(AppError::role_required("Manager"));
    }

    Ok(next.run(req).await)
}
