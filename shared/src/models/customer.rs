//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity, one row per reservation submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique when present
    pub phone: Option<String>,
    /// Unique when present
    pub email: Option<String>,
}
