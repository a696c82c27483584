//! Staff-Shift Assignment Repository

use super::{RepoError, RepoResult};
use shared::models::{ApprovalStatus, ShiftAssignment};
use sqlx::SqlitePool;

const ASSIGNMENT_SELECT: &str = "SELECT a.id, a.staff_id, st.name AS staff_name, a.shift_id, sh.start_time, sh.end_time, a.status FROM staff_shift a JOIN staff st ON st.id = a.staff_id JOIN shift sh ON sh.id = a.shift_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ShiftAssignment>> {
    let row = sqlx::query_as::<_, ShiftAssignment>(&format!("{ASSIGNMENT_SELECT} WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Non-Denied assignments of a staff member, optionally skipping one assignment
pub async fn find_active_for_staff(
    pool: &SqlitePool,
    staff_id: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Vec<ShiftAssignment>> {
    let rows = sqlx::query_as::<_, ShiftAssignment>(&format!(
        "{ASSIGNMENT_SELECT} WHERE a.staff_id = ? AND a.status != ? AND a.id != ? ORDER BY sh.start_time"
    ))
    .bind(staff_id)
    .bind(ApprovalStatus::Denied)
    .bind(exclude_id.unwrap_or(0))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_for_shift(pool: &SqlitePool, shift_id: i64) -> RepoResult<Vec<ShiftAssignment>> {
    let rows = sqlx::query_as::<_, ShiftAssignment>(&format!(
        "{ASSIGNMENT_SELECT} WHERE a.shift_id = ? ORDER BY st.name"
    ))
    .bind(shift_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_for_staff(pool: &SqlitePool, staff_id: i64) -> RepoResult<Vec<ShiftAssignment>> {
    let rows = sqlx::query_as::<_, ShiftAssignment>(&format!(
        "{ASSIGNMENT_SELECT} WHERE a.staff_id = ? ORDER BY sh.start_time"
    ))
    .bind(staff_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Assignments whose shift intersects `[start, end)`
pub async fn find_in_range(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<ShiftAssignment>> {
    let rows = sqlx::query_as::<_, ShiftAssignment>(&format!(
        "{ASSIGNMENT_SELECT} WHERE sh.start_time < ? AND sh.end_time > ? ORDER BY sh.start_time, st.name"
    ))
    .bind(end)
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert an assignment; an existing (staff, shift) pair is `Duplicate`
/// Insert an assignment, or re-open a Denied row for the same pair
///
/// An active (Pending/Approved) row for the pair is `Duplicate`.
pub async fn insert(
    pool: &SqlitePool,
    staff_id: i64,
    shift_id: i64,
    status: ApprovalStatus,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff_shift (staff_id, shift_id, status) VALUES (?, ?, ?) \
         ON CONFLICT (staff_id, shift_id) DO UPDATE SET status = excluded.status \
         WHERE staff_shift.status = ? RETURNING id",
    )
    .bind(staff_id)
    .bind(shift_id)
    .bind(status)
    .bind(ApprovalStatus::Denied)
    .fetch_optional(pool)
    .await?;
    id.ok_or_else(|| {
        RepoError::Duplicate(format!("Staff {staff_id} already on shift {shift_id}"))
    })
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: ApprovalStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE staff_shift SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assignment {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM staff_shift WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assignment {id} not found")));
    }
    Ok(())
}
