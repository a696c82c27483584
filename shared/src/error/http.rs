//! ErrorCode -> HTTP status

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,

            NotFound | ReservationNotFound | OrderNotFound | InventoryItemNotFound
            | SupplierNotFound | MenuItemNotFound | ShiftNotFound | AssignmentNotFound
            | StaffNotFound => StatusCode::NOT_FOUND,

            AlreadyExists | NoTableAvailable | CustomerAlreadyExists | OrderStatusTerminal
            | InventoryItemExists | SupplierInUse | ShiftOverlap | AssignmentExists => {
                StatusCode::CONFLICT
            }

            // 写入阶段被存储层拒绝
            OrderItemInsertFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ReservationFailed | OrderHeaderFailed | OrderTotalFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            _ => match self.category() {
                ErrorCategory::Auth => StatusCode::UNAUTHORIZED,
                ErrorCategory::Permission => StatusCode::FORBIDDEN,
                ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_404() {
        for code in [
            ErrorCode::ReservationNotFound,
            ErrorCode::OrderNotFound,
            ErrorCode::AssignmentNotFound,
        ] {
            assert_eq!(code.http_status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn booking_and_schedule_clashes_are_409() {
        assert_eq!(ErrorCode::NoTableAvailable.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ShiftOverlap.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::SupplierInUse.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_falls_back_on_category() {
        assert_eq!(ErrorCode::InvalidCredentials.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::SessionExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::RoleRequired.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::DatabaseError.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn order_save_failures() {
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::OrderItemInvalid.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::OrderItemInsertFailed.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::OrderTotalFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCode::ShiftInvalidRange.http_status(), StatusCode::BAD_REQUEST);
    }
}
