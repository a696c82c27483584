//! Inventory Repository

use super::{RepoError, RepoResult};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, MenuItemIngredient};
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT i.id, i.name, i.quantity, i.unit, i.reorder_level, i.supplier_id, s.name AS supplier_name FROM inventory_item i LEFT JOIN supplier s ON s.id = i.supplier_id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let items = sqlx::query_as::<_, InventoryItem>(&format!("{ITEM_SELECT} ORDER BY i.name"))
        .fetch_all(pool)
        .await?;
    Ok(items)
}

/// Items at or below their reorder level
pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let items = sqlx::query_as::<_, InventoryItem>(&format!(
        "{ITEM_SELECT} WHERE i.quantity <= i.reorder_level ORDER BY i.name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(&format!("{ITEM_SELECT} WHERE i.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO inventory_item (name, quantity, unit, reorder_level, supplier_id) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(data.reorder_level)
    .bind(data.supplier_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read created inventory item".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: InventoryItemUpdate,
) -> RepoResult<InventoryItem> {
    let rows = sqlx::query(
        "UPDATE inventory_item SET name = COALESCE(?1, name), quantity = COALESCE(?2, quantity), unit = COALESCE(?3, unit), reorder_level = COALESCE(?4, reorder_level), supplier_id = COALESCE(?5, supplier_id) WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(data.reorder_level)
    .bind(data.supplier_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM inventory_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    Ok(())
}

/// Ingredients recorded for a menu item
pub async fn find_ingredients(
    pool: &SqlitePool,
    menu_item_id: i64,
) -> RepoResult<Vec<MenuItemIngredient>> {
    let rows = sqlx::query_as::<_, MenuItemIngredient>(
        "SELECT menu_item_id, inventory_item_id, quantity_required FROM menu_item_ingredient WHERE menu_item_id = ? ORDER BY inventory_item_id",
    )
    .bind(menu_item_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert or replace the quantity an ingredient link requires
pub async fn upsert_ingredient(pool: &SqlitePool, link: &MenuItemIngredient) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO menu_item_ingredient (menu_item_id, inventory_item_id, quantity_required) VALUES (?, ?, ?) ON CONFLICT (menu_item_id, inventory_item_id) DO UPDATE SET quantity_required = excluded.quantity_required",
    )
    .bind(link.menu_item_id)
    .bind(link.inventory_item_id)
    .bind(link.quantity_required)
    .execute(pool)
    .await?;
    Ok(())
}
