//! Staff authentication routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// /staff/login - public
pub fn public_router() -> Router<ServerState> {
    Router::new().route("/staff/login", get(handler::login_page).post(handler::login))
}

/// /staff/logout, /staff/me - behind the session gate
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/staff/logout", get(handler::logout).post(handler::logout))
        .route("/staff/me", get(handler::me))
}
