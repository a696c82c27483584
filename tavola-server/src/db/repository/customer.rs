//! Customer Repository

use super::RepoResult;
use shared::models::Customer;
use sqlx::{SqliteConnection, SqlitePool};

/// Insert a customer inside the caller's transaction
///
/// Duplicate phone or email surfaces as `RepoError::Duplicate`.
pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO customer (name, phone, email) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(phone)
    .bind(email)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let customer =
        sqlx::query_as::<_, Customer>("SELECT id, name, phone, email FROM customer WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(customer)
}
