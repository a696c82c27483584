//! Supplier Handlers

use axum::extract::{Path, State};
use axum::response::Redirect;
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};

use crate::api::extract::FormOrJson;
use crate::api::response::{see_other, view, with_form};
use crate::core::ServerState;
use crate::db::repository::{RepoError, supplier};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_optional, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

const LIST_PATH: &str = "/staff/suppliers";

fn map_repo(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::SupplierNotFound, msg),
        RepoError::Duplicate(_) => AppError::already_exists("Supplier"),
        e => e.into(),
    }
}

fn validate_contact(
    contact_name: &Option<String>,
    phone: &Option<String>,
    email: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(contact_name, "contact_name", MAX_NAME_LEN)?;
    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(email, "email", MAX_EMAIL_LEN)?;
    Ok(())
}

/// GET /staff/suppliers
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Supplier>>> {
    let suppliers = supplier::find_all(&state.pool).await?;
    Ok(view("suppliers", suppliers))
}

/// POST /staff/suppliers
pub async fn create(
    State(state): State<ServerState>,
    FormOrJson(data): FormOrJson<SupplierCreate>,
) -> AppResult<Redirect> {
    let data = SupplierCreate {
        name: data.name.trim().to_string(),
        contact_name: normalize_optional(data.contact_name),
        phone: normalize_optional(data.phone),
        email: normalize_optional(data.email),
    };
    validate_required_text(&data.name, "name", MAX_NAME_LEN)
        .and_then(|_| validate_contact(&data.contact_name, &data.phone, &data.email))
        .map_err(|e| with_form(e, &data))?;

    let echo = data.clone();
    let created = supplier::create(&state.pool, data)
        .await
        .map_err(|e| with_form(map_repo(e), &echo))?;

    tracing::info!(supplier_id = created.id, name = %created.name, "Supplier created");
    Ok(see_other(LIST_PATH))
}

/// POST /staff/suppliers/{id}/update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    FormOrJson(data): FormOrJson<SupplierUpdate>,
) -> AppResult<Redirect> {
    let data = SupplierUpdate {
        name: data.name.map(|n| n.trim().to_string()),
        contact_name: normalize_optional(data.contact_name),
        phone: normalize_optional(data.phone),
        email: normalize_optional(data.email),
    };
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN).map_err(|e| with_form(e, &data))?;
    }
    validate_contact(&data.contact_name, &data.phone, &data.email)
        .map_err(|e| with_form(e, &data))?;

    let echo = data.clone();
    supplier::update(&state.pool, id, data)
        .await
        .map_err(|e| with_form(map_repo(e), &echo))?;
    Ok(see_other(LIST_PATH))
}

/// POST /staff/suppliers/{id}/delete
///
/// Refused while inventory items still reference the supplier.
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    let in_use = supplier::count_items(&state.pool, id).await?;
    if in_use > 0 {
        return Err(AppError::new(ErrorCode::SupplierInUse)
            .with_detail("supplier_id", id)
            .with_detail("inventory_items", in_use));
    }

    supplier::delete(&state.pool, id).await.map_err(map_repo)?;
    tracing::info!(supplier_id = id, "Supplier deleted");
    Ok(see_other(LIST_PATH))
}
