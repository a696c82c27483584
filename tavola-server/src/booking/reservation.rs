//! 预订流程
//!
//! Confirmed → Seated | Cancelled | Completed | No-Show. Status changes are
//! free-form; staff may set any status from any other.

use shared::models::{
    ReservationConfirmation, ReservationListing, ReservationRequest, ReservationStatus,
};
use shared::util::format_millis;
use sqlx::SqlitePool;
use thiserror::Error;

use super::availability::find_available_table;
use crate::db::repository::{RepoError, customer, reservation};
use crate::utils::time::date_time_to_millis;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PARTY_SIZE, MAX_SHORT_TEXT_LEN, normalize_optional,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("{0}")]
    Invalid(AppError),

    #[error("No table available")]
    NoAvailability,

    #[error("Customer insert failed: {0}")]
    CustomerInsert(RepoError),

    #[error("Reservation insert failed: {0}")]
    ReservationInsert(RepoError),

    #[error("Reservation {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::Invalid(e) => e,
            ReservationError::NoAvailability => AppError::new(ErrorCode::NoTableAvailable),
            ReservationError::CustomerInsert(RepoError::Duplicate(_)) => {
                AppError::new(ErrorCode::CustomerAlreadyExists)
            }
            ReservationError::CustomerInsert(e) | ReservationError::ReservationInsert(e) => {
                tracing::error!(error = %e, "Reservation write failed");
                AppError::with_message(
                    ErrorCode::ReservationFailed,
                    "Error creating reservation. Please try again.",
                )
            }
            ReservationError::NotFound(id) => AppError::with_message(
                ErrorCode::ReservationNotFound,
                format!("Reservation {id} not found"),
            ),
            ReservationError::Database(e) => {
                tracing::error!(error = %e, "Reservation workflow database error");
                AppError::new(ErrorCode::ReservationFailed)
            }
        }
    }
}

/// Validated booking input
#[derive(Debug, Clone)]
struct Booking {
    name: String,
    phone: Option<String>,
    email: Option<String>,
    date_time: i64,
    guests: i64,
}

fn validate(req: &ReservationRequest) -> Result<Booking, AppError> {
    let name = req.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    let phone = normalize_optional(req.phone.clone());
    validate_optional_text(&phone, "phone", MAX_SHORT_TEXT_LEN)?;
    let email = normalize_optional(req.email.clone());
    validate_optional_text(&email, "email", MAX_EMAIL_LEN)?;

    let guests = req
        .guests
        .positive_int()
        .filter(|g| *g <= MAX_PARTY_SIZE)
        .ok_or_else(|| {
            AppError::validation(format!(
                "Number of guests must be between 1 and {MAX_PARTY_SIZE}, got {}",
                req.guests
            ))
            .with_detail("field", "guests")
        })?;

    let date_time = date_time_to_millis(&req.date, &req.time)?;

    Ok(Booking {
        name,
        phone,
        email,
        date_time,
        guests,
    })
}

/// Book a table
///
/// Validates the form, picks the lowest free table and writes customer and
/// reservation in one transaction. Returns the new reservation id.
pub async fn create_reservation(
    pool: &SqlitePool,
    req: &ReservationRequest,
) -> Result<i64, ReservationError> {
    let booking = validate(req).map_err(ReservationError::Invalid)?;

    let table = find_available_table(pool, booking.date_time, booking.guests)
        .await?
        .ok_or(ReservationError::NoAvailability)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let customer_id = customer::insert(
        &mut *tx,
        &booking.name,
        booking.phone.as_deref(),
        booking.email.as_deref(),
    )
    .await
    .map_err(ReservationError::CustomerInsert)?;

    let id = reservation::insert(
        &mut *tx,
        customer_id,
        table,
        booking.date_time,
        booking.guests,
    )
    .await
    .map_err(ReservationError::ReservationInsert)?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        reservation_id = id,
        table,
        guests = booking.guests,
        at = %format_millis(booking.date_time),
        "Reservation confirmed"
    );
    Ok(id)
}

/// Reservations at or after `now`, soonest first
pub async fn list_upcoming(
    pool: &SqlitePool,
    now: i64,
) -> Result<Vec<ReservationListing>, ReservationError> {
    Ok(reservation::list_upcoming(pool, now).await?)
}

pub async fn find_confirmation(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ReservationConfirmation>, ReservationError> {
    Ok(reservation::find_confirmation(pool, id).await?)
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> Result<(), ReservationError> {
    match reservation::update_status(pool, id, status).await {
        Ok(()) => {
            tracing::info!(reservation_id = id, status = status.as_str(), "Reservation status updated");
            Ok(())
        }
        Err(RepoError::NotFound(_)) => Err(ReservationError::NotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Delete a reservation together with its orders and their line items
pub async fn delete_reservation(pool: &SqlitePool, id: i64) -> Result<(), ReservationError> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let items = reservation::delete_dependent_order_items(&mut *tx, id).await?;
    let orders = reservation::delete_dependent_orders(&mut *tx, id).await?;
    match reservation::delete(&mut *tx, id).await {
        Ok(()) => {}
        Err(RepoError::NotFound(_)) => return Err(ReservationError::NotFound(id)),
        Err(e) => return Err(e.into()),
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(reservation_id = id, orders, items, "Reservation deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::TABLE_COUNT;
    use crate::db::DbService;
    use crate::db::repository::{order, staff};
    use shared::models::{OrderStatus, RawScalar, StaffRole};

    async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn request(name: &str, time: &str) -> ReservationRequest {
        ReservationRequest {
            name: name.into(),
            phone: None,
            email: None,
            date: "2026-06-01".into(),
            time: time.into(),
            guests: RawScalar::from("4"),
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_lowest_table() {
        let pool = pool().await;
        let first = create_reservation(&pool, &request("Ann", "19:00")).await.unwrap();
        let second = create_reservation(&pool, &request("Ben", "19:00")).await.unwrap();

        let first = find_confirmation(&pool, first).await.unwrap().unwrap();
        let second = find_confirmation(&pool, second).await.unwrap().unwrap();
        assert_eq!(first.table_number, 1);
        assert_eq!(first.status, ReservationStatus::Confirmed);
        assert_eq!(first.number_of_guests, 4);
        assert_eq!(second.table_number, 2);
        assert_eq!(second.customer_name, "Ben");
    }

    #[tokio::test]
    async fn test_full_house_is_rejected() {
        let pool = pool().await;
        for i in 0..TABLE_COUNT {
            create_reservation(&pool, &request(&format!("Guest {i}"), "20:00"))
                .await
                .unwrap();
        }
        let err = create_reservation(&pool, &request("Late", "20:00")).await.unwrap_err();
        assert!(matches!(err, ReservationError::NoAvailability));
        assert_eq!(AppError::from(err).code, ErrorCode::NoTableAvailable);
        assert_eq!(count(&pool, "customer").await, TABLE_COUNT);
    }

    #[tokio::test]
    async fn test_cancelled_reservation_releases_table() {
        let pool = pool().await;
        let id = create_reservation(&pool, &request("Ann", "19:00")).await.unwrap();
        update_status(&pool, id, ReservationStatus::Cancelled).await.unwrap();

        let next = create_reservation(&pool, &request("Ben", "19:00")).await.unwrap();
        let next = find_confirmation(&pool, next).await.unwrap().unwrap();
        assert_eq!(next.table_number, 1);
    }

    #[tokio::test]
    async fn test_window_is_forward_looking_only() {
        let pool = pool().await;
        let ann = create_reservation(&pool, &request("Ann", "18:00")).await.unwrap();
        // Ann started before Ben's window, so her table looks free
        let ben = create_reservation(&pool, &request("Ben", "19:00")).await.unwrap();
        // Ann's 18:00 start falls in [17:00, 19:00); Ben's 19:00 does not
        let cleo = create_reservation(&pool, &request("Cleo", "17:00")).await.unwrap();
        let dan = create_reservation(&pool, &request("Dan", "21:00")).await.unwrap();

        let mut tables = Vec::new();
        for id in [ann, ben, cleo, dan] {
            tables.push(find_confirmation(&pool, id).await.unwrap().unwrap().table_number);
        }
        assert_eq!(tables, vec![1, 1, 2, 1]);
    }

    #[tokio::test]
    async fn test_duplicate_phone_rolls_back() {
        let pool = pool().await;
        let mut req = request("Ann", "19:00");
        req.phone = Some("555-0100".into());
        create_reservation(&pool, &req).await.unwrap();

        req.name = "Impostor".into();
        req.time = "21:30".into();
        let err = create_reservation(&pool, &req).await.unwrap_err();
        assert!(matches!(err, ReservationError::CustomerInsert(RepoError::Duplicate(_))));
        assert_eq!(AppError::from(err).code, ErrorCode::CustomerAlreadyExists);
        assert_eq!(count(&pool, "reservation").await, 1);
    }

    #[tokio::test]
    async fn test_failed_reservation_insert_drops_customer() {
        let pool = pool().await;
        sqlx::query(
            "CREATE TRIGGER reject_reservation BEFORE INSERT ON reservation BEGIN SELECT RAISE(ABORT, 'table locked'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        let mut req = request("Ann", "19:00");
        req.phone = Some("555-0100".into());
        let err = create_reservation(&pool, &req).await.unwrap_err();
        assert!(matches!(err, ReservationError::ReservationInsert(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::ReservationFailed);
        assert_eq!(count(&pool, "customer").await, 0);
        assert_eq!(count(&pool, "reservation").await, 0);

        // the phone number was never taken
        sqlx::query("DROP TRIGGER reject_reservation")
            .execute(&pool)
            .await
            .unwrap();
        create_reservation(&pool, &req).await.unwrap();
    }

    #[tokio::test]
    async fn test_completed_releases_no_show_holds() {
        let pool = pool().await;
        let done = create_reservation(&pool, &request("Ann", "19:00")).await.unwrap();
        let missing = create_reservation(&pool, &request("Ben", "19:00")).await.unwrap();
        update_status(&pool, done, ReservationStatus::Completed).await.unwrap();
        update_status(&pool, missing, ReservationStatus::NoShow).await.unwrap();

        let next = create_reservation(&pool, &request("Cleo", "19:00")).await.unwrap();
        let next = find_confirmation(&pool, next).await.unwrap().unwrap();
        assert_eq!(next.table_number, 1);

        let last = create_reservation(&pool, &request("Dan", "19:00")).await.unwrap();
        let last = find_confirmation(&pool, last).await.unwrap().unwrap();
        assert_eq!(last.table_number, 3);
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_sql() {
        let pool = pool().await;

        let mut bad_date = request("Ann", "19:00");
        bad_date.date = "June 1st".into();
        let err = create_reservation(&pool, &bad_date).await.unwrap_err();
        assert!(matches!(err, ReservationError::Invalid(_)));

        let mut no_guests = request("Ann", "19:00");
        no_guests.guests = RawScalar::from(0);
        let app: AppError = create_reservation(&pool, &no_guests).await.unwrap_err().into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);

        let blank_name = request("   ", "19:00");
        assert!(create_reservation(&pool, &blank_name).await.is_err());
        assert_eq!(count(&pool, "customer").await, 0);
    }

    #[tokio::test]
    async fn test_blank_contact_fields_are_stored_as_null() {
        let pool = pool().await;
        let mut req = request("Ann", "19:00");
        req.phone = Some("  ".into());
        req.email = Some(String::new());
        let first = create_reservation(&pool, &req).await.unwrap();
        // blank values do not collide on the unique index
        create_reservation(&pool, &req).await.unwrap();

        let confirmation = find_confirmation(&pool, first).await.unwrap().unwrap();
        assert!(confirmation.phone.is_none());
        assert!(confirmation.email.is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_orders() {
        let pool = pool().await;
        let id = create_reservation(&pool, &request("Ann", "19:00")).await.unwrap();

        staff::insert_if_absent(&pool, "Alice Waiter", "waiter1", StaffRole::Waiter, "x")
            .await
            .unwrap();
        sqlx::query("INSERT INTO menu_item (name, price, category) VALUES ('Tiramisu', 8.99, 'Dessert')")
            .execute(&pool)
            .await
            .unwrap();
        {
            let mut conn = pool.acquire().await.unwrap();
            let order_id = order::insert_header(&mut *conn, Some(id), 1, 1, OrderStatus::Placed, 0)
                .await
                .unwrap();
            order::insert_item(&mut *conn, order_id, 1, 2, None, 17.98)
                .await
                .unwrap();
        }

        delete_reservation(&pool, id).await.unwrap();
        assert_eq!(count(&pool, "reservation").await, 0);
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_item").await, 0);

        let err = delete_reservation(&pool, id).await.unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::ReservationNotFound);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let pool = pool().await;
        let err = update_status(&pool, 404, ReservationStatus::Seated).await.unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(404)));
    }
}
