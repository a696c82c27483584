//! 班次管理

use shared::models::{ScheduleView, Shift, ShiftCreate, ShiftUpdate};
use sqlx::SqlitePool;

use super::SchedulingError;
use crate::db::repository::{RepoError, assignment, shift};
use crate::utils::time::parse_date_time_millis;
use crate::utils::validation::{MAX_NOTE_LEN, normalize_optional, validate_optional_text};

fn check_range(start: i64, end: i64) -> Result<(), SchedulingError> {
    if end <= start {
        return Err(SchedulingError::InvalidRange);
    }
    Ok(())
}

fn parse_time(value: &str) -> Result<i64, SchedulingError> {
    parse_date_time_millis(value).map_err(SchedulingError::Invalid)
}

pub async fn create_shift(pool: &SqlitePool, data: ShiftCreate) -> Result<Shift, SchedulingError> {
    let start = parse_time(&data.start_time)?;
    let end = parse_time(&data.end_time)?;
    check_range(start, end)?;

    let note = normalize_optional(data.note);
    validate_optional_text(&note, "note", MAX_NOTE_LEN).map_err(SchedulingError::Invalid)?;

    let created = shift::create(pool, start, end, data.required_role, note.as_deref()).await?;
    tracing::info!(shift_id = created.id, start, end, "Shift created");
    Ok(created)
}

/// Patch a shift; omitted fields keep their value
///
/// Existing assignments are not re-checked against the new times.
pub async fn update_shift(
    pool: &SqlitePool,
    id: i64,
    data: ShiftUpdate,
) -> Result<Shift, SchedulingError> {
    let mut current = shift::find_by_id(pool, id)
        .await?
        .ok_or(SchedulingError::ShiftNotFound(id))?;

    if let Some(start) = &data.start_time {
        current.start_time = parse_time(start)?;
    }
    if let Some(end) = &data.end_time {
        current.end_time = parse_time(end)?;
    }
    check_range(current.start_time, current.end_time)?;

    if data.required_role.is_some() {
        current.required_role = data.required_role;
    }
    if data.note.is_some() {
        current.note = normalize_optional(data.note);
        validate_optional_text(&current.note, "note", MAX_NOTE_LEN)
            .map_err(SchedulingError::Invalid)?;
    }

    match shift::update(pool, &current).await {
        Ok(updated) => Ok(updated),
        Err(RepoError::NotFound(_)) => Err(SchedulingError::ShiftNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Delete a shift and its assignments
pub async fn delete_shift(pool: &SqlitePool, id: i64) -> Result<(), SchedulingError> {
    match shift::delete(pool, id).await {
        Ok(()) => {
            tracing::info!(shift_id = id, "Shift deleted");
            Ok(())
        }
        Err(RepoError::NotFound(_)) => Err(SchedulingError::ShiftNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Shifts intersecting `[start, end)` with their assignments
pub async fn schedule_view(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> Result<ScheduleView, SchedulingError> {
    let shifts = shift::find_in_range(pool, start, end).await?;
    let assignments = assignment::find_in_range(pool, start, end).await?;
    Ok(ScheduleView {
        shifts,
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::utils::time::parse_date_time_millis;
    use shared::models::StaffRole;

    fn create(start: &str, end: &str) -> ShiftCreate {
        ShiftCreate {
            start_time: start.into(),
            end_time: end.into(),
            required_role: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let shift = create_shift(&pool, create("2026-06-01T09:00", "2026-06-01T17:00"))
            .await
            .unwrap();
        assert_eq!(shift.end_time - shift.start_time, 8 * shared::util::HOUR_MS);

        let updated = update_shift(
            &pool,
            shift.id,
            ShiftUpdate {
                end_time: Some("2026-06-01 15:30".into()),
                required_role: Some(StaffRole::Chef),
                note: Some("  prep day ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.start_time, shift.start_time);
        assert_eq!(
            updated.end_time,
            parse_date_time_millis("2026-06-01T15:30").unwrap()
        );
        assert_eq!(updated.required_role, Some(StaffRole::Chef));
        assert_eq!(updated.note.as_deref(), Some("prep day"));
    }

    #[tokio::test]
    async fn test_end_must_follow_start() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let err = create_shift(&pool, create("2026-06-01T17:00", "2026-06-01T17:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidRange));

        let shift = create_shift(&pool, create("2026-06-01T09:00", "2026-06-01T17:00"))
            .await
            .unwrap();
        let err = update_shift(
            &pool,
            shift.id,
            ShiftUpdate {
                start_time: Some("2026-06-01T18:00".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidRange));
    }

    #[tokio::test]
    async fn test_schedule_view_range() {
        let pool = DbService::in_memory().await.unwrap().pool;
        create_shift(&pool, create("2026-06-01T09:00", "2026-06-01T17:00")).await.unwrap();
        create_shift(&pool, create("2026-06-02T09:00", "2026-06-02T17:00")).await.unwrap();

        let start = parse_date_time_millis("2026-06-02T00:00").unwrap();
        let end = parse_date_time_millis("2026-06-03T00:00").unwrap();
        let view = schedule_view(&pool, start, end).await.unwrap();
        assert_eq!(view.shifts.len(), 1);
        assert!(view.assignments.is_empty());

        assert!(matches!(
            delete_shift(&pool, 99).await,
            Err(SchedulingError::ShiftNotFound(99))
        ));
    }
}
