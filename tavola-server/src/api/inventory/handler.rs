//! Inventory Handlers

use axum::extract::{Path, State};
use axum::response::Redirect;
use serde::Serialize;
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, Supplier};

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::core::ServerState;
use crate::db::repository::{RepoError, inventory, supplier};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

const LIST_PATH: &str = "/staff/inventory";

fn map_repo(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::InventoryItemNotFound, msg),
        RepoError::Duplicate(_) => AppError::new(ErrorCode::InventoryItemExists),
        e => e.into(),
    }
}

async fn check_supplier(state: &ServerState, supplier_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = supplier_id
        && supplier::find_by_id(&state.pool, id).await?.is_none()
    {
        return Err(
            AppError::with_message(ErrorCode::SupplierNotFound, format!("Supplier {id} not found"))
                .with_detail("field", "supplier_id"),
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct InventoryView {
    items: Vec<InventoryItem>,
    /// At or below reorder level
    low_stock: Vec<i64>,
    suppliers: Vec<Supplier>,
}

/// GET /staff/inventory
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<InventoryView>> {
    let items = inventory::find_all(&state.pool).await?;
    let suppliers = supplier::find_all(&state.pool).await?;
    let low_stock = items
        .iter()
        .filter(|i| i.quantity <= i.reorder_level)
        .map(|i| i.id)
        .collect();

    Ok(view(
        "inventory",
        InventoryView {
            items,
            low_stock,
            suppliers,
        },
    ))
}

fn validate_create(data: &InventoryItemCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative(data.quantity, "quantity")?;
    validate_non_negative(data.reorder_level, "reorder_level")?;
    Ok(())
}

fn validate_update(data: &InventoryItemUpdate) -> AppResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    if let Some(quantity) = data.quantity {
        validate_non_negative(quantity, "quantity")?;
    }
    if let Some(level) = data.reorder_level {
        validate_non_negative(level, "reorder_level")?;
    }
    Ok(())
}

/// POST /staff/inventory
pub async fn create(
    State(state): State<ServerState>,
    FormOrJson(mut data): FormOrJson<InventoryItemCreate>,
) -> AppResult<Redirect> {
    data.name = data.name.trim().to_string();
    data.unit = data.unit.trim().to_string();
    validate_create(&data).map_err(|e| with_form(e, &data))?;
    check_supplier(&state, data.supplier_id)
        .await
        .map_err(|e| with_form(e, &data))?;

    let echo = data.clone();
    let item = inventory::create(&state.pool, data)
        .await
        .map_err(|e| with_form(map_repo(e), &echo))?;

    tracing::info!(inventory_item_id = item.id, name = %item.name, "Inventory item created");
    Ok(see_other(LIST_PATH))
}

/// POST /staff/inventory/{id}/update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    FormOrJson(mut data): FormOrJson<InventoryItemUpdate>,
) -> AppResult<Redirect> {
    data.name = data.name.map(|n| n.trim().to_string());
    validate_update(&data).map_err(|e| with_form(e, &data))?;
    check_supplier(&state, data.supplier_id)
        .await
        .map_err(|e| with_form(e, &data))?;

    let echo = data.clone();
    let item = inventory::update(&state.pool, id, data)
        .await
        .map_err(|e| with_form(map_repo(e), &echo))?;

    if item.quantity <= item.reorder_level {
        tracing::warn!(
            inventory_item_id = id,
            quantity = item.quantity,
            reorder_level = item.reorder_level,
            "Inventory item at reorder level"
        );
    }
    Ok(see_other(LIST_PATH))
}

/// POST /staff/inventory/{id}/delete
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    inventory::delete(&state.pool, id).await.map_err(map_repo)?;
    tracing::info!(inventory_item_id = id, "Inventory item deleted");
    Ok(see_other(LIST_PATH))
}
