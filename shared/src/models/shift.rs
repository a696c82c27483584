//! Shift Model (排班)

use serde::{Deserialize, Serialize};

use super::staff::StaffRole;

/// Approval status of a staff-shift assignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }
}

/// Shift entity, `[start_time, end_time)` in Unix millis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub required_role: Option<StaffRole>,
    pub note: Option<String>,
}

/// Create shift payload (`YYYY-MM-DDTHH:MM` date-times)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub start_time: String,
    pub end_time: String,
    pub required_role: Option<StaffRole>,
    pub note: Option<String>,
}

/// Update shift payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftUpdate {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub required_role: Option<StaffRole>,
    pub note: Option<String>,
}

/// Assign payload; `staff_id` defaults to the requesting staff member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftAssignRequest {
    pub staff_id: Option<i64>,
}

/// Assignment joined with staff and shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftAssignment {
    pub id: i64,
    pub staff_id: i64,
    pub staff_name: String,
    pub shift_id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub status: ApprovalStatus,
}

/// Schedule view: shifts in range plus their assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleView {
    pub shifts: Vec<Shift>,
    pub assignments: Vec<ShiftAssignment>,
}
