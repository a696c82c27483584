//! CurrentStaff Extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;

use super::{CurrentStaff, SESSION_COOKIE};
use crate::AppError;
use crate::core::ServerState;

/// Pulls the signed-in staff member from the request
///
/// Handlers behind [`super::require_session`] find it in the extensions;
/// anywhere else the session cookie is resolved directly.
impl FromRequestParts<ServerState> for CurrentStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(staff) = parts.extensions.get::<CurrentStaff>() {
            return Ok(staff.clone());
        }

        let token = parts
            .extensions
            .get::<Cookies>()
            .and_then(|cookies| cookies.get(SESSION_COOKIE))
            .map(|c| c.value().to_string())
            .ok_or_else(AppError::not_authenticated)?;

        let session = state
            .sessions
            .get(&token)
            .ok_or_else(AppError::session_expired)?;

        let staff = CurrentStaff { session, token };
        parts.extensions.insert(staff.clone());
        Ok(staff)
    }
}
