//! 厨房显示
//!
//! Orders waiting on the kitchen (Ready for Kitchen, Preparing), oldest
//! first, and one-step status progression along the order lifecycle.

use shared::models::{KitchenTicket, OrderStatus};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Kitchen tickets with their line items
pub async fn list_tickets(pool: &SqlitePool) -> AppResult<Vec<KitchenTicket>> {
    let orders = order::find_for_kitchen(pool).await?;
    let mut tickets = Vec::with_capacity(orders.len());
    for listing in orders {
        let items = order::find_items(pool, listing.id).await?;
        tickets.push(KitchenTicket {
            order: listing,
            items,
        });
    }
    Ok(tickets)
}

/// Move an order to the next status
///
/// Paid and Cancelled are terminal. The update is conditional on the status
/// read, so two cooks pressing the button at once advance it only once.
pub async fn advance_status(pool: &SqlitePool, id: i64) -> AppResult<OrderStatus> {
    let current = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))?
        .status;

    let next = current.next().ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderStatusTerminal,
            format!("Order {id} is already {}", current.as_str()),
        )
    })?;

    if !order::transition_status(pool, id, current, next).await? {
        return Err(AppError::conflict(format!(
            "Order {id} changed status concurrently"
        )));
    }

    tracing::info!(
        order_id = id,
        from = current.as_str(),
        to = next.as_str(),
        on_board = next.is_kitchen_visible(),
        "Order status advanced"
    );
    Ok(next)
}
