//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/staff/orders", get(handler::list))
        .nest("/staff/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/new", get(handler::new_form))
        .route("/edit/{id}", get(handler::edit_form))
        .route("/save", post(handler::save))
}
