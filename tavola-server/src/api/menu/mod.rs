//! Menu API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// GET /menu - 公共路由
pub fn public_router() -> Router<ServerState> {
    Router::new().route("/menu", get(handler::public_menu))
}

pub fn router() -> Router<ServerState> {
    Router::new().nest("/staff/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}/ingredients",
            get(handler::ingredients).post(handler::set_ingredient),
        )
}
