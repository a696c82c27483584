//! 预订模块
//!
//! - [`availability`] - lowest free table in a two-hour window
//! - [`reservation`] - booking workflow and staff-side reservation management

pub mod availability;
pub mod reservation;

pub use availability::{TABLE_COUNT, find_available_table, lowest_free_table};
pub use reservation::{
    ReservationError, create_reservation, delete_reservation, find_confirmation, list_upcoming,
    update_status,
};
