//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum StaffRole {
    Manager,
    Waiter,
    Chef,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Waiter => "Waiter",
            Self::Chef => "Chef",
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffResponse {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: StaffRole,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Identity attached to an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub staff_id: i64,
    pub staff_name: String,
    pub staff_role: StaffRole,
}
