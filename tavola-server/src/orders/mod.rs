//! 订单模块
//!
//! - [`save`] - validate and persist an order with its line items in one transaction
//! - [`kitchen`] - kitchen display and status progression
//! - [`query`] - order listings and detail views
//! - [`money`] - decimal arithmetic for subtotals and totals

pub mod kitchen;
pub mod money;
pub mod query;
pub mod save;

pub use kitchen::{advance_status, list_tickets};
pub use query::{find_order_detail, list_orders};
pub use save::{LineItem, OrderSaveError, save_order, validate_items};
