//! Menu Item Repository

use super::RepoResult;
use shared::models::{MenuCategory, MenuItem};
use sqlx::SqlitePool;

/// All menu items ordered by category, then name
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category FROM menu_item ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Insert unless the name is taken; returns whether a row was written
pub async fn insert_if_absent(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    price: f64,
    category: MenuCategory,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO menu_item (name, description, price, category) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(category)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
