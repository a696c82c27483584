//! Staff Repository

use super::RepoResult;
use shared::models::{StaffResponse, StaffRole};
use sqlx::SqlitePool;

/// Staff row including the password hash (never serialized)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaffAccount {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: StaffRole,
    pub password_hash: String,
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<StaffAccount>> {
    let account = sqlx::query_as::<_, StaffAccount>(
        "SELECT id, name, username, role, password_hash FROM staff WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StaffResponse>> {
    let staff = sqlx::query_as::<_, StaffResponse>(
        "SELECT id, name, username, role FROM staff WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<StaffResponse>> {
    let staff =
        sqlx::query_as::<_, StaffResponse>("SELECT id, name, username, role FROM staff ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(staff)
}

/// Insert unless the username is taken; returns whether a row was written
pub async fn insert_if_absent(
    pool: &SqlitePool,
    name: &str,
    username: &str,
    role: StaffRole,
    password_hash: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO staff (name, username, role, password_hash) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(username)
    .bind(role)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn exists(pool: &SqlitePool, username: &str) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
