//! 排班模块
//!
//! - [`shifts`] - shift CRUD and the schedule view
//! - [`assignments`] - staff-shift assignment with overlap check and approval
//! - [`overlap`] - half-open interval intersection

pub mod assignments;
pub mod overlap;
pub mod shifts;

pub use assignments::{
    assign_staff, remove_assignment, set_approval, shift_roster, staff_assignments,
};
pub use shifts::{create_shift, delete_shift, schedule_view, update_shift};

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Shift {0} not found")]
    ShiftNotFound(i64),

    #[error("Assignment {0} not found")]
    AssignmentNotFound(i64),

    #[error("Staff {0} not found")]
    StaffNotFound(i64),

    #[error("Shift must end after it starts")]
    InvalidRange,

    #[error("Overlaps shift {shift_id}")]
    Overlap { shift_id: i64 },

    #[error("Staff {staff_id} is already assigned to shift {shift_id}")]
    AlreadyAssigned { staff_id: i64, shift_id: i64 },

    #[error("Only a manager can do that")]
    ManagerRequired,

    #[error("{0}")]
    Invalid(AppError),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::ShiftNotFound(id) => {
                AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {id} not found"))
            }
            SchedulingError::AssignmentNotFound(id) => AppError::with_message(
                ErrorCode::AssignmentNotFound,
                format!("Assignment {id} not found"),
            ),
            SchedulingError::StaffNotFound(id) => {
                AppError::with_message(ErrorCode::StaffNotFound, format!("Staff {id} not found"))
            }
            SchedulingError::InvalidRange => AppError::new(ErrorCode::ShiftInvalidRange),
            SchedulingError::Overlap { shift_id } => AppError::with_message(
                ErrorCode::ShiftOverlap,
                format!("Overlaps shift {shift_id} already assigned to this staff member"),
            )
            .with_detail("conflicting_shift_id", shift_id),
            SchedulingError::AlreadyAssigned { staff_id, shift_id } => AppError::with_message(
                ErrorCode::AssignmentExists,
                format!("Staff {staff_id} is already assigned to shift {shift_id}"),
            ),
            SchedulingError::ManagerRequired => AppError::role_required("Manager"),
            SchedulingError::Invalid(e) => e,
            SchedulingError::Database(e) => e.into(),
        }
    }
}
