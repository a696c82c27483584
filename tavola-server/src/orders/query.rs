//! Order listings and detail

use shared::models::{OrderDetail, OrderListing};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, order};

/// All orders with the owning staff member's name, newest first
pub async fn list_orders(pool: &SqlitePool) -> RepoResult<Vec<OrderListing>> {
    order::find_all(pool).await
}

/// Header plus line items; `None` when the order does not exist
pub async fn find_order_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = order::find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = order::find_items(pool, id).await?;
    Ok(Some(OrderDetail { order, items }))
}
