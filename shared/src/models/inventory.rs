//! Inventory & Supplier Models
//!
//! Reference data only: orders never consume stock.

use serde::{Deserialize, Serialize};

/// Supplier entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Update supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    /// e.g. "kg", "bottle"
    pub unit: String,
    pub reorder_level: f64,
    pub supplier_id: Option<i64>,
    /// Joined from suppliers
    pub supplier_name: Option<String>,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub reorder_level: f64,
    pub supplier_id: Option<i64>,
}

/// Update inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub reorder_level: Option<f64>,
    pub supplier_id: Option<i64>,
}

/// Ingredient link between a menu item and an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemIngredient {
    pub menu_item_id: i64,
    pub inventory_item_id: i64,
    pub quantity_required: f64,
}
