//! Data models
//!
//! Shared between tavola-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod customer;
pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod raw;
pub mod reservation;
pub mod shift;
pub mod staff;

// Re-exports
pub use customer::*;
pub use inventory::*;
pub use menu_item::*;
pub use order::*;
pub use raw::*;
pub use reservation::*;
pub use shift::*;
pub use staff::*;
