//! 桌位分配
//!
//! A reservation holds its table for two hours. Only reservations that
//! *start* inside `[requested_at, requested_at + 2h)` count as occupying a
//! table; one that started earlier and runs into the window is not seen.

use shared::util::HOUR_MS;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::db::repository::{RepoResult, reservation};

/// Tables in the dining room, numbered `1..=TABLE_COUNT`
pub const TABLE_COUNT: i64 = 10;

/// How long a reservation holds its table
pub const SEATING_WINDOW_MS: i64 = 2 * HOUR_MS;

/// Lowest table number not in `occupied`
pub fn lowest_free_table(occupied: &[i64]) -> Option<i64> {
    let taken: HashSet<i64> = occupied.iter().copied().collect();
    (1..=TABLE_COUNT).find(|table| !taken.contains(table))
}

/// Find a free table for a party at `requested_at` (Unix millis)
///
/// `party_size` is logged only; tables are not sized. Read-only, so two
/// concurrent bookings can be handed the same table.
pub async fn find_available_table(
    pool: &SqlitePool,
    requested_at: i64,
    party_size: i64,
) -> RepoResult<Option<i64>> {
    let occupied =
        reservation::occupied_tables(pool, requested_at, requested_at + SEATING_WINDOW_MS).await?;
    let table = lowest_free_table(&occupied);

    tracing::debug!(
        requested_at,
        party_size,
        occupied = occupied.len(),
        table = ?table,
        "Table availability checked"
    );
    Ok(table)
}
