//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 员工登录 / 登出
//! - [`reservations`] - 顾客预订 + 员工预订管理
//! - [`menu`] - 菜单和配料
//! - [`dashboard`] - 员工首页
//! - [`orders`] - 订单列表和订单表单
//! - [`kitchen`] - 厨房显示
//! - [`inventory`] - 库存
//! - [`suppliers`] - 供应商
//! - [`schedule`] - 排班
//!
//! Page routes answer with `ApiResponse` whose `message` names the view;
//! form posts answer with `303 See Other` on success.

pub mod extract;
pub mod response;

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod schedule;
pub mod suppliers;

use axum::Router;
use axum::middleware;
use http::{HeaderName, HeaderValue};
use tower_cookies::CookieManagerLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_session;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, with the session gate applied to the staff portal
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    // /staff/* (except login) - session required
    let staff = Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(menu::router())
        .merge(inventory::router())
        .merge(suppliers::router())
        .merge(schedule::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        // Public
        .merge(health::router())
        .merge(auth::public_router())
        .merge(reservations::public_router())
        .merge(menu::public_router())
        .merge(staff)
}

/// Fully configured application: routes, middleware and state
///
/// Used by the HTTP server and by integration tests (`oneshot`).
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(&state)
        // Session cookie jar for the gate and login/logout
        .layer(CookieManagerLayer::new())
        // Trace - request spans
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
        .layer(PropagateRequestIdLayer::new(request_id))
        .with_state(state)
}
