//! 员工排班分配
//!
//! A staff member may request a shift for themselves (Pending); a manager
//! may assign anyone (Approved). Either way the new shift must not overlap
//! any non-Denied shift the staff member already holds.

use shared::models::{ApprovalStatus, SessionInfo, ShiftAssignment};
use sqlx::SqlitePool;

use super::SchedulingError;
use super::overlap::find_conflict;
use crate::db::repository::{RepoError, assignment, shift, staff};
use crate::security_log;
use crate::utils::AppError;

/// Assign `staff_id` to `shift_id` on behalf of `actor`
pub async fn assign_staff(
    pool: &SqlitePool,
    actor: &SessionInfo,
    staff_id: i64,
    shift_id: i64,
) -> Result<i64, SchedulingError> {
    let is_manager = actor.staff_role.is_manager();
    if !is_manager && actor.staff_id != staff_id {
        security_log!(
            "WARN",
            "assign_other_denied",
            staff_id = actor.staff_id,
            target_staff_id = staff_id,
            shift_id = shift_id
        );
        return Err(SchedulingError::ManagerRequired);
    }

    let candidate = shift::find_by_id(pool, shift_id)
        .await?
        .ok_or(SchedulingError::ShiftNotFound(shift_id))?;
    let member = staff::find_by_id(pool, staff_id)
        .await?
        .ok_or(SchedulingError::StaffNotFound(staff_id))?;

    if let Some(required) = candidate.required_role
        && required != member.role
    {
        return Err(SchedulingError::Invalid(
            AppError::validation(format!(
                "Shift {shift_id} requires a {required}, {} is a {}",
                member.name, member.role
            ))
            .with_detail("field", "staff_id"),
        ));
    }

    let existing = assignment::find_active_for_staff(pool, staff_id, None).await?;
    if existing.iter().any(|a| a.shift_id == shift_id) {
        return Err(SchedulingError::AlreadyAssigned { staff_id, shift_id });
    }
    if let Some(conflict) = find_conflict(candidate.start_time, candidate.end_time, &existing) {
        return Err(SchedulingError::Overlap {
            shift_id: conflict.shift_id,
        });
    }

    let status = if is_manager {
        ApprovalStatus::Approved
    } else {
        ApprovalStatus::Pending
    };

    let id = match assignment::insert(pool, staff_id, shift_id, status).await {
        Ok(id) => id,
        Err(RepoError::Duplicate(_)) => {
            return Err(SchedulingError::AlreadyAssigned { staff_id, shift_id });
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        assignment_id = id,
        staff_id,
        shift_id,
        status = status.as_str(),
        by = actor.staff_id,
        "Shift assigned"
    );
    Ok(id)
}

/// Approve or deny an assignment
///
/// Approving re-runs the overlap check against the staff member's other
/// assignments, since they may have changed while this one was pending.
pub async fn set_approval(
    pool: &SqlitePool,
    id: i64,
    status: ApprovalStatus,
) -> Result<ShiftAssignment, SchedulingError> {
    if status == ApprovalStatus::Pending {
        return Err(SchedulingError::Invalid(
            AppError::validation("Approval status must be Approved or Denied")
                .with_detail("field", "status"),
        ));
    }

    let current = assignment::find_by_id(pool, id)
        .await?
        .ok_or(SchedulingError::AssignmentNotFound(id))?;

    if status == ApprovalStatus::Approved {
        let others = assignment::find_active_for_staff(pool, current.staff_id, Some(id)).await?;
        if let Some(conflict) = find_conflict(current.start_time, current.end_time, &others) {
            return Err(SchedulingError::Overlap {
                shift_id: conflict.shift_id,
            });
        }
    }

    match assignment::set_status(pool, id, status).await {
        Ok(()) => {}
        Err(RepoError::NotFound(_)) => return Err(SchedulingError::AssignmentNotFound(id)),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(assignment_id = id, status = status.as_str(), "Assignment reviewed");
    Ok(ShiftAssignment { status, ..current })
}

pub async fn remove_assignment(pool: &SqlitePool, id: i64) -> Result<(), SchedulingError> {
    match assignment::delete(pool, id).await {
        Ok(()) => Ok(()),
        Err(RepoError::NotFound(_)) => Err(SchedulingError::AssignmentNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Everyone on a shift, by name
pub async fn shift_roster(
    pool: &SqlitePool,
    shift_id: i64,
) -> Result<Vec<ShiftAssignment>, SchedulingError> {
    if shift::find_by_id(pool, shift_id).await?.is_none() {
        return Err(SchedulingError::ShiftNotFound(shift_id));
    }
    Ok(assignment::find_for_shift(pool, shift_id).await?)
}

/// A staff member's shifts in start order, Denied included
pub async fn staff_assignments(
    pool: &SqlitePool,
    staff_id: i64,
) -> Result<Vec<ShiftAssignment>, SchedulingError> {
    if staff::find_by_id(pool, staff_id).await?.is_none() {
        return Err(SchedulingError::StaffNotFound(staff_id));
    }
    Ok(assignment::find_for_staff(pool, staff_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::seed::seed_sample_data;
    use crate::scheduling::create_shift;
    use crate::utils::ErrorCode;
    use shared::models::{ShiftCreate, StaffRole};

    const MANAGER_ID: i64 = 1;
    const WAITER_ID: i64 = 2;

    fn manager() -> SessionInfo {
        SessionInfo {
            staff_id: MANAGER_ID,
            staff_name: "John Manager".into(),
            staff_role: StaffRole::Manager,
        }
    }

    fn waiter() -> SessionInfo {
        SessionInfo {
            staff_id: WAITER_ID,
            staff_name: "Alice Waiter".into(),
            staff_role: StaffRole::Waiter,
        }
    }

    async fn setup() -> SqlitePool {
        let db = DbService::in_memory().await.unwrap();
        seed_sample_data(&db.pool).await.unwrap();
        db.pool
    }

    async fn shift(pool: &SqlitePool, start: &str, end: &str) -> i64 {
        create_shift(
            pool,
            ShiftCreate {
                start_time: format!("2026-06-01T{start}"),
                end_time: format!("2026-06-01T{end}"),
                required_role: None,
                note: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_back_to_back_then_overlap() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        let evening = shift(&pool, "17:00", "21:00").await;
        let late = shift(&pool, "16:59", "21:00").await;

        assign_staff(&pool, &manager(), WAITER_ID, day).await.unwrap();
        assign_staff(&pool, &manager(), WAITER_ID, evening).await.unwrap();

        let err = assign_staff(&pool, &manager(), WAITER_ID, late).await.unwrap_err();
        assert!(matches!(err, SchedulingError::Overlap { shift_id } if shift_id == day));
        assert_eq!(AppError::from(err).code, ErrorCode::ShiftOverlap);
    }

    #[tokio::test]
    async fn test_self_request_is_pending_manager_is_approved() {
        let pool = setup().await;
        let morning = shift(&pool, "08:00", "12:00").await;
        let night = shift(&pool, "18:00", "23:00").await;

        let own = assign_staff(&pool, &waiter(), WAITER_ID, morning).await.unwrap();
        let by_manager = assign_staff(&pool, &manager(), WAITER_ID, night).await.unwrap();

        let own = assignment::find_by_id(&pool, own).await.unwrap().unwrap();
        let by_manager = assignment::find_by_id(&pool, by_manager).await.unwrap().unwrap();
        assert_eq!(own.status, ApprovalStatus::Pending);
        assert_eq!(by_manager.status, ApprovalStatus::Approved);
        assert_eq!(own.staff_name, "Alice Waiter");
    }

    #[tokio::test]
    async fn test_staff_cannot_assign_others() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        let err = assign_staff(&pool, &waiter(), MANAGER_ID, day).await.unwrap_err();
        assert!(matches!(err, SchedulingError::ManagerRequired));
        assert_eq!(AppError::from(err).code, ErrorCode::RoleRequired);
    }

    #[tokio::test]
    async fn test_double_assignment_and_missing_rows() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap();

        let err = assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap_err();
        assert!(matches!(err, SchedulingError::AlreadyAssigned { .. }));

        let err = assign_staff(&pool, &manager(), WAITER_ID, 404).await.unwrap_err();
        assert!(matches!(err, SchedulingError::ShiftNotFound(404)));
        let err = assign_staff(&pool, &manager(), 404, day).await.unwrap_err();
        assert!(matches!(err, SchedulingError::StaffNotFound(404)));
    }

    #[tokio::test]
    async fn test_denied_assignment_frees_the_slot() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        let overlapping = shift(&pool, "12:00", "20:00").await;

        let first = assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap();
        assert!(assign_staff(&pool, &waiter(), WAITER_ID, overlapping).await.is_err());

        let denied = set_approval(&pool, first, ApprovalStatus::Denied).await.unwrap();
        assert_eq!(denied.status, ApprovalStatus::Denied);
        assign_staff(&pool, &waiter(), WAITER_ID, overlapping).await.unwrap();

        // re-approving the denied one now collides with the new assignment
        let err = set_approval(&pool, first, ApprovalStatus::Approved).await.unwrap_err();
        assert!(matches!(err, SchedulingError::Overlap { shift_id } if shift_id == overlapping));
    }

    #[tokio::test]
    async fn test_denied_pair_can_be_assigned_again() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        let first = assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap();
        set_approval(&pool, first, ApprovalStatus::Denied).await.unwrap();

        let again = assign_staff(&pool, &manager(), WAITER_ID, day).await.unwrap();
        assert_eq!(again, first);
        let row = assignment::find_by_id(&pool, again).await.unwrap().unwrap();
        assert_eq!(row.status, ApprovalStatus::Approved);
        assert_eq!(shift_roster(&pool, day).await.unwrap().len(), 1);

        // still active: a second request is a duplicate
        let err = assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap_err();
        assert!(matches!(err, SchedulingError::AlreadyAssigned { .. }));
    }

    #[tokio::test]
    async fn test_approve_and_remove() {
        let pool = setup().await;
        let day = shift(&pool, "09:00", "17:00").await;
        let id = assign_staff(&pool, &waiter(), WAITER_ID, day).await.unwrap();

        let approved = set_approval(&pool, id, ApprovalStatus::Approved).await.unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);
        assert!(set_approval(&pool, id, ApprovalStatus::Pending).await.is_err());

        remove_assignment(&pool, id).await.unwrap();
        assert!(matches!(
            remove_assignment(&pool, id).await,
            Err(SchedulingError::AssignmentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_required_role_enforced() {
        let pool = setup().await;
        let kitchen = create_shift(
            &pool,
            ShiftCreate {
                start_time: "2026-06-01T10:00".into(),
                end_time: "2026-06-01T14:00".into(),
                required_role: Some(StaffRole::Chef),
                note: None,
            },
        )
        .await
        .unwrap();
        let err = assign_staff(&pool, &manager(), WAITER_ID, kitchen.id).await.unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_roster_and_staff_listing() {
        let pool = setup().await;
        let evening = shift(&pool, "17:00", "21:00").await;
        let morning = shift(&pool, "08:00", "12:00").await;
        assign_staff(&pool, &manager(), WAITER_ID, evening).await.unwrap();
        assign_staff(&pool, &manager(), MANAGER_ID, evening).await.unwrap();
        assign_staff(&pool, &waiter(), WAITER_ID, morning).await.unwrap();

        let roster = shift_roster(&pool, evening).await.unwrap();
        let names: Vec<_> = roster.iter().map(|a| a.staff_name.as_str()).collect();
        assert_eq!(names, ["Alice Waiter", "John Manager"]);

        let mine = staff_assignments(&pool, WAITER_ID).await.unwrap();
        let shifts: Vec<_> = mine.iter().map(|a| a.shift_id).collect();
        assert_eq!(shifts, [morning, evening]);

        assert!(matches!(
            shift_roster(&pool, 404).await,
            Err(SchedulingError::ShiftNotFound(404))
        ));
        assert!(matches!(
            staff_assignments(&pool, 404).await,
            Err(SchedulingError::StaffNotFound(404))
        ));
    }
}
