//! Order Repository
//!
//! Header and line-item writes take a connection so the save flow can run
//! them inside one transaction.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItemDetail, OrderListing, OrderStatus};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

const LISTING_SELECT: &str = "SELECT o.id, s.name AS staff_name, o.table_number, o.status, o.order_date_time, o.total_price FROM orders o JOIN staff s ON s.id = o.staff_id";

pub async fn insert_header(
    conn: &mut SqliteConnection,
    reservation_id: Option<i64>,
    staff_id: i64,
    table_number: i64,
    status: OrderStatus,
    order_date_time: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (reservation_id, staff_id, table_number, order_date_time, status, total_price) VALUES (?, ?, ?, ?, ?, 0) RETURNING id",
    )
    .bind(reservation_id)
    .bind(staff_id)
    .bind(table_number)
    .bind(order_date_time)
    .bind(status)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Overwrite the header of an existing order with the latest save
pub async fn update_header(
    conn: &mut SqliteConnection,
    id: i64,
    staff_id: i64,
    table_number: i64,
    status: OrderStatus,
    order_date_time: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET staff_id = ?, table_number = ?, status = ?, order_date_time = ? WHERE id = ?",
    )
    .bind(staff_id)
    .bind(table_number)
    .bind(status)
    .bind(order_date_time)
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

pub async fn delete_items(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM order_item WHERE order_id = ?")
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    special_requests: Option<&str>,
    subtotal: f64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_item (order_id, menu_item_id, quantity, special_requests, subtotal) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(special_requests)
    .bind(subtotal)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn update_total(conn: &mut SqliteConnection, id: i64, total: f64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET total_price = ? WHERE id = ?")
        .bind(total)
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderListing>> {
    let rows = sqlx::query_as::<_, OrderListing>(&format!(
        "{LISTING_SELECT} ORDER BY o.order_date_time DESC, o.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Orders placed in `[start, end)`, oldest first
pub async fn find_between(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<OrderListing>> {
    let rows = sqlx::query_as::<_, OrderListing>(&format!(
        "{LISTING_SELECT} WHERE o.order_date_time >= ? AND o.order_date_time < ? ORDER BY o.order_date_time, o.id"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Orders waiting on the kitchen, oldest first
pub async fn find_for_kitchen(pool: &SqlitePool) -> RepoResult<Vec<OrderListing>> {
    let rows = sqlx::query_as::<_, OrderListing>(&format!(
        "{LISTING_SELECT} WHERE o.status IN (?, ?) ORDER BY o.order_date_time, o.id"
    ))
    .bind(OrderStatus::ReadyForKitchen)
    .bind(OrderStatus::Preparing)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Order>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, reservation_id, staff_id, table_number, status, order_date_time, total_price FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(order)
}

/// Line items joined with the menu item's name and current price
pub async fn find_items<'e, E>(executor: E, order_id: i64) -> RepoResult<Vec<OrderItemDetail>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.menu_item_id, m.name AS menu_item_name, m.price, oi.quantity, oi.special_requests, oi.subtotal FROM order_item oi JOIN menu_item m ON m.id = oi.menu_item_id WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(items)
}

/// Compare-and-set status change; `false` when the row no longer has `from`
pub async fn transition_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
