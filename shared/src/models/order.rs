//! Order Model

use serde::{Deserialize, Serialize};

use super::raw::RawScalar;

/// Order status, in lifecycle order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderStatus {
    #[default]
    Placed,
    #[serde(rename = "Ready for Kitchen")]
    #[cfg_attr(feature = "db", sqlx(rename = "Ready for Kitchen"))]
    ReadyForKitchen,
    Preparing,
    #[serde(rename = "Ready for Service")]
    #[cfg_attr(feature = "db", sqlx(rename = "Ready for Service"))]
    ReadyForService,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::ReadyForKitchen => "Ready for Kitchen",
            Self::Preparing => "Preparing",
            Self::ReadyForService => "Ready for Service",
            Self::Served => "Served",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Next status in the kitchen flow; `None` once Paid or Cancelled
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Placed => Some(Self::ReadyForKitchen),
            Self::ReadyForKitchen => Some(Self::Preparing),
            Self::Preparing => Some(Self::ReadyForService),
            Self::ReadyForService => Some(Self::Served),
            Self::Served => Some(Self::Paid),
            Self::Paid | Self::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Statuses shown on the kitchen display
    pub fn is_kitchen_visible(&self) -> bool {
        matches!(self, Self::ReadyForKitchen | Self::Preparing)
    }
}

/// Order header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub reservation_id: Option<i64>,
    pub staff_id: i64,
    pub table_number: i64,
    pub status: OrderStatus,
    /// Unix millis (UTC)
    pub order_date_time: i64,
    pub total_price: f64,
}

/// Order row with the owning staff member's name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderListing {
    pub id: i64,
    pub staff_name: String,
    pub table_number: i64,
    pub status: OrderStatus,
    pub order_date_time: i64,
    pub total_price: f64,
}

/// Line item joined with its menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    /// Current menu price, not the price at order time
    pub price: f64,
    pub quantity: i64,
    pub special_requests: Option<String>,
    pub subtotal: f64,
}

/// Order with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Kitchen display ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenTicket {
    pub order: OrderListing,
    pub items: Vec<OrderItemDetail>,
}

/// Line item as submitted by the order form, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(alias = "menuItemId")]
    pub menu_item_id: RawScalar,
    pub quantity: RawScalar,
    pub price: RawScalar,
    #[serde(default, alias = "specialRequests")]
    pub special_requests: Option<String>,
}

/// Order save payload (create when `order_id` is absent, replace otherwise)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSaveRequest {
    #[serde(default, alias = "orderId")]
    pub order_id: Option<i64>,
    #[serde(default, alias = "reservationId")]
    pub reservation_id: Option<i64>,
    #[serde(alias = "tableNumber")]
    pub table_number: RawScalar,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
}
