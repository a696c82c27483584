//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{ReservationConfirmation, ReservationListing, ReservationStatus};
use sqlx::{SqliteConnection, SqlitePool};

const LISTING_SELECT: &str = "SELECT r.id, c.name AS customer_name, c.phone, r.table_number, r.date_time, r.number_of_guests, r.status FROM reservation r JOIN customer c ON c.id = r.customer_id";

/// Table numbers held by reservations starting in `[start, end)`
///
/// Statuses that no longer hold a table (see `ReservationStatus::holds_table`)
/// release it.
pub async fn occupied_tables(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<i64>> {
    let released: Vec<ReservationStatus> = ReservationStatus::ALL
        .into_iter()
        .filter(|s| !s.holds_table())
        .collect();
    let placeholders = vec!["?"; released.len()].join(", ");
    let sql = format!(
        "SELECT DISTINCT table_number FROM reservation WHERE date_time >= ? AND date_time < ? AND status NOT IN ({placeholders})"
    );

    let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(start).bind(end);
    for status in released {
        query = query.bind(status);
    }
    Ok(query.fetch_all(pool).await?)
}

/// Insert a Confirmed reservation inside the caller's transaction
pub async fn insert(
    conn: &mut SqliteConnection,
    customer_id: i64,
    table_number: i64,
    date_time: i64,
    number_of_guests: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reservation (customer_id, table_number, date_time, number_of_guests, status) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(table_number)
    .bind(date_time)
    .bind(number_of_guests)
    .bind(ReservationStatus::Confirmed)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_confirmation(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationConfirmation>> {
    let row = sqlx::query_as::<_, ReservationConfirmation>(
        "SELECT r.id, c.name AS customer_name, c.phone, c.email, r.table_number, r.date_time, r.number_of_guests, r.status FROM reservation r JOIN customer c ON c.id = r.customer_id WHERE r.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Reservations at or after `from`, soonest first
pub async fn list_upcoming(pool: &SqlitePool, from: i64) -> RepoResult<Vec<ReservationListing>> {
    let rows = sqlx::query_as::<_, ReservationListing>(&format!(
        "{LISTING_SELECT} WHERE r.date_time >= ? ORDER BY r.date_time"
    ))
    .bind(from)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Reservations in `[start, end)`, soonest first
pub async fn list_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<ReservationListing>> {
    let rows = sqlx::query_as::<_, ReservationListing>(&format!(
        "{LISTING_SELECT} WHERE r.date_time >= ? AND r.date_time < ? ORDER BY r.date_time"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: ReservationStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

/// Delete line items of every order attached to the reservation
pub async fn delete_dependent_order_items(conn: &mut SqliteConnection, id: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "DELETE FROM order_item WHERE order_id IN (SELECT id FROM orders WHERE reservation_id = ?)",
    )
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected())
}

/// Delete every order attached to the reservation
pub async fn delete_dependent_orders(conn: &mut SqliteConnection, id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM orders WHERE reservation_id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}

/// Delete the reservation row; `NotFound` when nothing was deleted
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}
