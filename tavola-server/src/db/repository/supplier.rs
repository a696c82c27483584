//! Supplier Repository

use super::{RepoError, RepoResult};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Supplier>> {
    let suppliers = sqlx::query_as::<_, Supplier>(
        "SELECT id, name, contact_name, phone, email FROM supplier ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(suppliers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Supplier>> {
    let supplier = sqlx::query_as::<_, Supplier>(
        "SELECT id, name, contact_name, phone, email FROM supplier WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(supplier)
}

pub async fn create(pool: &SqlitePool, data: SupplierCreate) -> RepoResult<Supplier> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO supplier (name, contact_name, phone, email) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.contact_name)
    .bind(&data.phone)
    .bind(&data.email)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read created supplier".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SupplierUpdate) -> RepoResult<Supplier> {
    let rows = sqlx::query(
        "UPDATE supplier SET name = COALESCE(?1, name), contact_name = COALESCE(?2, contact_name), phone = COALESCE(?3, phone), email = COALESCE(?4, email) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.contact_name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Supplier {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Supplier {id} not found")))
}

/// Number of inventory items still pointing at the supplier
pub async fn count_items(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inventory_item WHERE supplier_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM supplier WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Supplier {id} not found")));
    }
    Ok(())
}
