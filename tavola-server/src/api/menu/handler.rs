//! Menu Handlers

use axum::extract::{Path, State};
use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, MenuItemIngredient, MenuSection};

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::core::ServerState;
use crate::db::repository::{inventory, menu_item};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Split a category-ordered item list into sections
fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        match sections.last_mut() {
            Some(section) if section.category == item.category => section.items.push(item),
            _ => sections.push(MenuSection {
                category: item.category,
                items: vec![item],
            }),
        }
    }
    sections
}

/// GET /menu
pub async fn public_menu(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<MenuSection>>> {
    let items = menu_item::find_all(&state.pool).await?;
    Ok(view("menu", group_by_category(items)))
}

/// GET /staff/menu
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<MenuItem>>> {
    let items = menu_item::find_all(&state.pool).await?;
    Ok(view("view_menu", items))
}

#[derive(Debug, Serialize)]
pub struct IngredientsView {
    menu_item: MenuItem,
    ingredients: Vec<MenuItemIngredient>,
}

async fn load_menu_item(state: &ServerState, id: i64) -> AppResult<MenuItem> {
    menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found")))
}

/// GET /staff/menu/{id}/ingredients
pub async fn ingredients(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<IngredientsView>> {
    let menu_item = load_menu_item(&state, id).await?;
    let ingredients = inventory::find_ingredients(&state.pool, id).await?;
    Ok(view(
        "menu_ingredients",
        IngredientsView {
            menu_item,
            ingredients,
        },
    ))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IngredientForm {
    inventory_item_id: i64,
    quantity_required: f64,
}

/// POST /staff/menu/{id}/ingredients - link or re-quantify an ingredient
pub async fn set_ingredient(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    FormOrJson(form): FormOrJson<IngredientForm>,
) -> AppResult<Redirect> {
    load_menu_item(&state, id).await?;

    if !form.quantity_required.is_finite() || form.quantity_required <= 0.0 {
        return Err(with_form(
            AppError::validation("quantity_required must be a positive number")
                .with_detail("field", "quantity_required"),
            &form,
        ));
    }
    if inventory::find_by_id(&state.pool, form.inventory_item_id).await?.is_none() {
        return Err(with_form(
            AppError::new(ErrorCode::InventoryItemNotFound),
            &form,
        ));
    }

    let link = MenuItemIngredient {
        menu_item_id: id,
        inventory_item_id: form.inventory_item_id,
        quantity_required: form.quantity_required,
    };
    inventory::upsert_ingredient(&state.pool, &link).await?;

    tracing::info!(
        menu_item_id = id,
        inventory_item_id = link.inventory_item_id,
        quantity = link.quantity_required,
        "Ingredient linked"
    );
    Ok(see_other(&format!("/staff/menu/{id}/ingredients")))
}
