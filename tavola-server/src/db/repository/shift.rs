//! Shift Repository

use super::{RepoError, RepoResult};
use shared::models::{Shift, StaffRole};
use sqlx::{Sqlite, SqlitePool};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Shift>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let shift = sqlx::query_as::<_, Shift>(
        "SELECT id, start_time, end_time, required_role, note FROM shift WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(shift)
}

/// Shifts that intersect `[start, end)`, earliest first
pub async fn find_in_range(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(
        "SELECT id, start_time, end_time, required_role, note FROM shift WHERE start_time < ? AND end_time > ? ORDER BY start_time, id",
    )
    .bind(end)
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(shifts)
}

pub async fn create(
    pool: &SqlitePool,
    start_time: i64,
    end_time: i64,
    required_role: Option<StaffRole>,
    note: Option<&str>,
) -> RepoResult<Shift> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO shift (start_time, end_time, required_role, note) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(start_time)
    .bind(end_time)
    .bind(required_role)
    .bind(note)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read created shift".into()))
}

/// Replace every column of an existing shift
pub async fn update(pool: &SqlitePool, shift: &Shift) -> RepoResult<Shift> {
    let rows = sqlx::query(
        "UPDATE shift SET start_time = ?, end_time = ?, required_role = ?, note = ? WHERE id = ?",
    )
    .bind(shift.start_time)
    .bind(shift.end_time)
    .bind(shift.required_role)
    .bind(&shift.note)
    .bind(shift.id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shift {} not found", shift.id)));
    }
    find_by_id(pool, shift.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", shift.id)))
}

/// Delete a shift; its assignments go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM shift WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shift {id} not found")));
    }
    Ok(())
}
