//! 班次重叠检测
//!
//! Shifts are half-open `[start, end)`, so back-to-back shifts do not overlap.

use shared::models::ShiftAssignment;

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && a_end > b_start
}

/// First existing assignment whose shift intersects `[start, end)`
pub fn find_conflict(
    start: i64,
    end: i64,
    existing: &[ShiftAssignment],
) -> Option<&ShiftAssignment> {
    existing
        .iter()
        .find(|a| overlaps(start, end, a.start_time, a.end_time))
}
