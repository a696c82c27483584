//! Schedule API 模块 (排班)
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /staff/schedule | GET | 登录 |
//! | /staff/schedule/shifts/{id}/assignments | GET | 登录 |
//! | /staff/schedule/staff/{id}/assignments | GET | 登录 |
//! | /staff/schedule/shifts/{id}/assign | POST | 登录 (为他人排班需经理) |
//! | /staff/schedule/shifts | POST | 经理 |
//! | /staff/schedule/shifts/{id}/update, /delete | POST | 经理 |
//! | /staff/schedule/assignments/{id}/approve, /deny, /delete | POST | 经理 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/staff/schedule", routes().merge(manager_routes()))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view_schedule))
        .route("/shifts/{id}/assignments", get(handler::shift_roster))
        .route("/staff/{id}/assignments", get(handler::staff_assignments))
        .route("/shifts/{id}/assign", post(handler::assign))
}

fn manager_routes() -> Router<ServerState> {
    Router::new()
        .route("/shifts", post(handler::create_shift))
        .route("/shifts/{id}/update", post(handler::update_shift))
        .route("/shifts/{id}/delete", post(handler::delete_shift))
        .route("/assignments/{id}/approve", post(handler::approve))
        .route("/assignments/{id}/deny", post(handler::deny))
        .route("/assignments/{id}/delete", post(handler::remove_assignment))
        .route_layer(middleware::from_fn(require_manager))
}
