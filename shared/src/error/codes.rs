//! Tavola error codes
//!
//! The leading digit picks the area (see [`ErrorCategory`](super::ErrorCategory)).
//! Codes are stable: clients match on the number, never on the message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One table drives the enum, its default messages and the u16 decoding.
macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal => $message:literal, )*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $value, )*
        }

        impl ErrorCode {
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// Default message, used when the caller supplies none
            pub const fn message(&self) -> &'static str {
                match self {
                    $( ErrorCode::$name => $message, )*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(ErrorCode::$name), )*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    // 0xxx
    Success = 0 => "Operation completed successfully",
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    /// Body or query could not be decoded
    InvalidRequest = 5 => "Invalid request",

    // 1xxx
    NotAuthenticated = 1001 => "User is not authenticated",
    /// Unknown username and wrong password look the same
    InvalidCredentials = 1002 => "Invalid username or password",
    SessionExpired = 1005 => "Session has expired",

    // 2xxx
    RoleRequired = 2002 => "Specific role is required",

    // 3xxx 预订
    ReservationNotFound = 3001 => "Reservation not found",
    NoTableAvailable = 3002 => "Sorry, no tables available for this time slot.",
    /// Phone or email already belongs to a customer
    CustomerAlreadyExists = 3003 => "Error creating reservation. Please try again.",
    ReservationFailed = 3004 => "An error occurred. Please try again.",

    // 4xxx 订单
    OrderNotFound = 4001 => "Order not found",
    OrderEmpty = 4007 => "No items submitted",
    OrderItemInvalid = 4008 => "Order item validation failed",
    OrderHeaderFailed = 4009 => "Failed to save order header",
    OrderTotalFailed = 4010 => "Failed to update order total",
    /// Usually a menu item id the store does not know
    OrderItemInsertFailed = 4011 => "Failed to save order item",
    OrderStatusTerminal = 4012 => "Order is already in a final status",

    // 5xxx 库存 / 供应商
    InventoryItemNotFound = 5001 => "Inventory item not found",
    InventoryItemExists = 5002 => "Inventory item already exists",
    SupplierNotFound = 5101 => "Supplier not found",
    SupplierInUse = 5102 => "Supplier is referenced by inventory items",

    // 6xxx
    MenuItemNotFound = 6001 => "Menu item not found",

    // 7xxx 排班
    ShiftNotFound = 7201 => "Shift not found",
    ShiftOverlap = 7202 => "Shift overlaps an existing shift",
    ShiftInvalidRange = 7203 => "Shift must end after it starts",
    AssignmentNotFound = 7301 => "Shift assignment not found",
    AssignmentExists = 7302 => "Staff member is already assigned to this shift",

    // 8xxx
    StaffNotFound = 8001 => "Staff member not found",

    // 9xxx
    InternalError = 9001 => "Internal server error",
    DatabaseError = 9002 => "Database error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A u16 with no matching [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);
