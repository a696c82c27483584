//! Error areas, keyed on the thousands digit of the code

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Reservation,
    Order,
    /// Stock items and suppliers
    Inventory,
    Menu,
    Schedule,
    Staff,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Reservation,
            4 => Self::Order,
            5 => Self::Inventory,
            6 => Self::Menu,
            7 => Self::Schedule,
            8 => Self::Staff,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
