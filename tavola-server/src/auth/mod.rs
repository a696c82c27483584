//! 认证模块
//!
//! Staff sign-in for the portal:
//!
//! - [`password`] - argon2 hashing and verification
//! - [`SessionStore`] - cookie token → staff session
//! - [`require_session`] / [`require_manager`] - route gates
//! - [`CurrentStaff`] - extractor for handlers behind the gate

mod extractor;
mod middleware;
pub mod password;
mod session;

pub use middleware::{require_manager, require_session};
pub use session::SessionStore;

use shared::models::{SessionInfo, StaffRole};
use sqlx::SqlitePool;
use tower_cookies::Cookie;
use tower_cookies::cookie::SameSite;

use crate::db::repository::staff;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Session cookie name
pub const SESSION_COOKIE: &str = "tavola_session";

/// Where unauthenticated staff requests are sent
pub const LOGIN_PATH: &str = "/staff/login";

/// Landing page after sign-in
pub const DASHBOARD_PATH: &str = "/staff/dashboard";

/// Authenticated staff member attached to the request
#[derive(Debug, Clone)]
pub struct CurrentStaff {
    pub session: SessionInfo,
    pub token: String,
}

impl CurrentStaff {
    pub fn id(&self) -> i64 {
        self.session.staff_id
    }

    pub fn name(&self) -> &str {
        &self.session.staff_name
    }

    pub fn role(&self) -> StaffRole {
        self.session.staff_role
    }

    pub fn is_manager(&self) -> bool {
        self.session.staff_role.is_manager()
    }
}

/// Check a username/password pair
///
/// Unknown usernames and wrong passwords yield the same
/// `InvalidCredentials` error, and both run one argon2 verification.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    plain: &str,
) -> AppResult<SessionInfo> {
    let account = staff::find_by_username(pool, username).await?;
    let candidate = plain.to_owned();

    let verified = match account {
        Some(account) => {
            let hash = account.password_hash.clone();
            let ok = tokio::task::spawn_blocking(move || password::verify_password(&candidate, &hash))
                .await
                .map_err(|e| AppError::internal(format!("Password check failed: {e}")))?;
            ok.then_some(account)
        }
        None => {
            tokio::task::spawn_blocking(move || password::verify_dummy(&candidate))
                .await
                .map_err(|e| AppError::internal(format!("Password check failed: {e}")))?;
            None
        }
    };

    match verified {
        Some(account) => {
            security_log!("INFO", "login_success", staff_id = account.id, username = account.username.clone());
            Ok(SessionInfo {
                staff_id: account.id,
                staff_name: account.name,
                staff_role: account.role,
            })
        }
        None => {
            security_log!("WARN", "login_failed", username = username.to_string());
            Err(AppError::invalid_credentials())
        }
    }
}

/// HttpOnly session cookie scoped to the whole site
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie used to clear the session on logout
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
