//! Reservation API 模块
//!
//! Public booking flow plus the staff reservation list.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// 顾客预订 - 公共路由
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/reserve", get(handler::reserve_form).post(handler::reserve))
        .route("/reservation-confirmed/{id}", get(handler::confirmed))
}

/// 员工预订管理
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/staff/reservations", routes())
        // legacy form action
        .route(
            "/staff/reservation/update_status/{id}",
            post(handler::update_status),
        )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/status", post(handler::update_status))
        .route("/{id}/delete", post(handler::delete))
}
