//! Order Handlers

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use shared::models::{MenuItem, OrderDetail, OrderListing, OrderSaveRequest};

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::orders;
use crate::utils::{ApiResponse, AppError, AppResult};

const LIST_PATH: &str = "/staff/orders";

/// Order form data; `order` is `None` for a new order
#[derive(Debug, Serialize)]
pub struct OrderFormView {
    order: Option<OrderDetail>,
    menu_items: Vec<MenuItem>,
    is_new: bool,
}

/// GET /staff/orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<OrderListing>>> {
    let orders = orders::list_orders(&state.pool).await?;
    Ok(view("manage_orders", orders))
}

/// GET /staff/order/new
pub async fn new_form(State(state): State<ServerState>) -> AppResult<ApiResponse<OrderFormView>> {
    let menu_items = menu_item::find_all(&state.pool).await?;
    Ok(view(
        "order_form",
        OrderFormView {
            order: None,
            menu_items,
            is_new: true,
        },
    ))
}

/// GET /staff/order/edit/{id}
///
/// Unknown orders go back to the order list.
pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let Some(order) = orders::find_order_detail(&state.pool, id).await? else {
        tracing::debug!(order_id = id, "Edit requested for missing order");
        return Ok(see_other(LIST_PATH).into_response());
    };
    let menu_items = menu_item::find_all(&state.pool).await?;

    Ok(view(
        "order_form",
        OrderFormView {
            order: Some(order),
            menu_items,
            is_new: false,
        },
    )
    .into_response())
}

/// POST /staff/order/save
///
/// Creates an order for the signed-in staff member, or replaces the one
/// named by `order_id`.
pub async fn save(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    FormOrJson(req): FormOrJson<OrderSaveRequest>,
) -> AppResult<Redirect> {
    orders::save_order(&state.pool, staff.id(), &req)
        .await
        .map_err(|e| with_form(AppError::from(e), &req))?;
    Ok(see_other(LIST_PATH))
}
