//! 员工首页
//!
//! Today's reservations and orders for the signed-in staff member, plus
//! inventory at or below its reorder level.

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use shared::models::{InventoryItem, OrderListing, ReservationListing, SessionInfo};

use crate::api::response::view;
use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::db::repository::{inventory, order, reservation};
use crate::utils::time::{day_end_millis, day_start_millis, today};
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/staff/dashboard", get(dashboard))
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    staff: SessionInfo,
    /// YYYY-MM-DD (UTC)
    date: String,
    reservations: Vec<ReservationListing>,
    orders: Vec<OrderListing>,
    low_stock: Vec<InventoryItem>,
}

/// GET /staff/dashboard
async fn dashboard(
    State(state): State<ServerState>,
    staff: CurrentStaff,
) -> AppResult<ApiResponse<DashboardView>> {
    let date = today();
    let (start, end) = (day_start_millis(date), day_end_millis(date));

    let reservations = reservation::list_between(&state.pool, start, end).await?;
    let orders = order::find_between(&state.pool, start, end).await?;
    let low_stock = inventory::find_low_stock(&state.pool).await?;

    Ok(view(
        "staff_dashboard",
        DashboardView {
            staff: staff.session,
            date: date.format("%Y-%m-%d").to_string(),
            reservations,
            orders,
            low_stock,
        },
    ))
}
