//! Schedule Handlers

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use shared::models::{
    ApprovalStatus, ScheduleView, ShiftAssignRequest, ShiftAssignment, ShiftCreate, ShiftUpdate,
    StaffResponse,
};

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::db::repository::staff;
use crate::scheduling;
use crate::utils::time::{day_start_millis, parse_date, today};
use crate::utils::{ApiResponse, AppError, AppResult};

const SCHEDULE_PATH: &str = "/staff/schedule";
const DEFAULT_DAYS: i64 = 7;
const MAX_DAYS: i64 = 62;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// YYYY-MM-DD, defaults to today
    pub from: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SchedulePage {
    from: i64,
    to: i64,
    #[serde(flatten)]
    schedule: ScheduleView,
    staff: Vec<StaffResponse>,
}

/// GET /staff/schedule?from=YYYY-MM-DD&days=N
pub async fn view_schedule(
    State(state): State<ServerState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<ApiResponse<SchedulePage>> {
    let from_date = match query.from.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let days = query.days.unwrap_or(DEFAULT_DAYS);
    if !(1..=MAX_DAYS).contains(&days) {
        return Err(AppError::validation(format!("days must be between 1 and {MAX_DAYS}"))
            .with_detail("field", "days"));
    }

    let from = day_start_millis(from_date);
    let to = from + days * shared::util::DAY_MS;
    let schedule = scheduling::schedule_view(&state.pool, from, to).await?;
    let staff = staff::find_all(&state.pool).await?;

    Ok(view(
        "schedule",
        SchedulePage {
            from,
            to,
            schedule,
            staff,
        },
    ))
}

/// GET /staff/schedule/shifts/{id}/assignments
pub async fn shift_roster(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<ShiftAssignment>>> {
    let roster = scheduling::shift_roster(&state.pool, id).await?;
    Ok(view("shift_roster", roster))
}

/// GET /staff/schedule/staff/{id}/assignments
pub async fn staff_assignments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<ShiftAssignment>>> {
    let assignments = scheduling::staff_assignments(&state.pool, id).await?;
    Ok(view("staff_shifts", assignments))
}

/// POST /staff/schedule/shifts
pub async fn create_shift(
    State(state): State<ServerState>,
    FormOrJson(data): FormOrJson<ShiftCreate>,
) -> AppResult<Redirect> {
    let echo = data.clone();
    scheduling::create_shift(&state.pool, data)
        .await
        .map_err(|e| with_form(AppError::from(e), &echo))?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/shifts/{id}/update
pub async fn update_shift(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    FormOrJson(data): FormOrJson<ShiftUpdate>,
) -> AppResult<Redirect> {
    let echo = data.clone();
    scheduling::update_shift(&state.pool, id, data)
        .await
        .map_err(|e| with_form(AppError::from(e), &echo))?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/shifts/{id}/delete
pub async fn delete_shift(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    scheduling::delete_shift(&state.pool, id).await?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/shifts/{id}/assign
///
/// Without `staff_id` the signed-in staff member requests the shift.
pub async fn assign(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(shift_id): Path<i64>,
    FormOrJson(req): FormOrJson<ShiftAssignRequest>,
) -> AppResult<Redirect> {
    let staff_id = req.staff_id.unwrap_or(staff.id());
    scheduling::assign_staff(&state.pool, &staff.session, staff_id, shift_id).await?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/assignments/{id}/approve
pub async fn approve(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    scheduling::set_approval(&state.pool, id, ApprovalStatus::Approved).await?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/assignments/{id}/deny
pub async fn deny(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    scheduling::set_approval(&state.pool, id, ApprovalStatus::Denied).await?;
    Ok(see_other(SCHEDULE_PATH))
}

/// POST /staff/schedule/assignments/{id}/delete
pub async fn remove_assignment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    scheduling::remove_assignment(&state.pool, id).await?;
    Ok(see_other(SCHEDULE_PATH))
}
