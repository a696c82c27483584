//! 订单保存
//!
//! An order form submission is validated as a whole before anything is
//! written, then header, line items and total are persisted in a single
//! transaction. Any failure drops the transaction, so a half-written order
//! is never visible.

use rust_decimal::Decimal;
use shared::models::{OrderSaveRequest, RawLineItem};
use shared::util::now_millis;
use sqlx::SqlitePool;
use thiserror::Error;

use super::money::{MAX_PRICE, MAX_QUANTITY, has_sub_cent, line_subtotal, to_decimal, to_f64};
use crate::db::repository::{RepoError, order};
use crate::utils::validation::MAX_NOTE_LEN;
use crate::utils::{AppError, ErrorCode};

/// Line item after validation
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub special_requests: Option<String>,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price, self.quantity)
    }
}

#[derive(Debug, Error)]
pub enum OrderSaveError {
    #[error("No items submitted")]
    NoItems,

    #[error("Invalid table number: {0}")]
    InvalidTable(String),

    #[error("Item {index}: invalid {field} '{value}'")]
    ItemValidation {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("Order header write failed: {0}")]
    HeaderUpsert(RepoError),

    #[error("Line item {index} insert failed: {source}")]
    ItemInsert { index: usize, source: RepoError },

    #[error("Order total update failed: {0}")]
    TotalUpdate(RepoError),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),
}

impl From<OrderSaveError> for AppError {
    fn from(err: OrderSaveError) -> Self {
        match err {
            OrderSaveError::NoItems => AppError::new(ErrorCode::OrderEmpty),
            OrderSaveError::InvalidTable(table) => {
                AppError::validation(format!("Table number must be a positive integer, got '{table}'"))
                    .with_detail("field", "table_number")
            }
            OrderSaveError::ItemValidation {
                index,
                field,
                value,
            } => AppError::with_message(
                ErrorCode::OrderItemInvalid,
                format!("Item {}: invalid {field} '{value}'", index + 1),
            )
            .with_detail("index", index)
            .with_detail("field", field)
            .with_detail("value", value),
            OrderSaveError::HeaderUpsert(RepoError::NotFound(msg)) => {
                AppError::with_message(ErrorCode::OrderNotFound, msg)
            }
            OrderSaveError::HeaderUpsert(e) => {
                tracing::error!(error = %e, "Order header write failed");
                AppError::new(ErrorCode::OrderHeaderFailed)
            }
            OrderSaveError::ItemInsert { index, source } => {
                tracing::warn!(index, error = %source, "Order line item rejected");
                AppError::with_message(
                    ErrorCode::OrderItemInsertFailed,
                    format!("Item {} could not be saved", index + 1),
                )
                .with_detail("index", index)
            }
            OrderSaveError::TotalUpdate(e) => {
                tracing::error!(error = %e, "Order total update failed");
                AppError::new(ErrorCode::OrderTotalFailed)
            }
            OrderSaveError::Database(e) => {
                tracing::error!(error = %e, "Order save database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

fn invalid(index: usize, field: &'static str, value: impl ToString) -> OrderSaveError {
    OrderSaveError::ItemValidation {
        index,
        field,
        value: value.to_string(),
    }
}

/// Validate every raw line item; the first bad field rejects the whole list
pub fn validate_items(raw: &[RawLineItem]) -> Result<Vec<LineItem>, OrderSaveError> {
    if raw.is_empty() {
        return Err(OrderSaveError::NoItems);
    }

    raw.iter()
        .enumerate()
        .map(|(index, item)| {
            let menu_item_id = item
                .menu_item_id
                .positive_int()
                .ok_or_else(|| invalid(index, "menu_item_id", &item.menu_item_id))?;
            let quantity = item
                .quantity
                .positive_int()
                .filter(|q| *q <= MAX_QUANTITY)
                .ok_or_else(|| invalid(index, "quantity", &item.quantity))?;
            // 精确到分, 否则小计取整会让总价偏离 Σ 单价×数量
            let unit_price = item
                .price
                .non_negative_number()
                .filter(|p| *p <= MAX_PRICE)
                .map(to_decimal)
                .filter(|d| !has_sub_cent(*d))
                .ok_or_else(|| invalid(index, "price", &item.price))?;

            let special_requests = item
                .special_requests
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            if let Some(note) = &special_requests
                && note.len() > MAX_NOTE_LEN
            {
                return Err(invalid(index, "special_requests", note.len()));
            }

            Ok(LineItem {
                menu_item_id,
                quantity,
                unit_price,
                special_requests,
            })
        })
        .collect()
}

/// Create or replace an order
///
/// Without `order_id` a new header is inserted for `staff_id`; with one, the
/// existing header is overwritten and its line items replaced. Returns the
/// order id.
pub async fn save_order(
    pool: &SqlitePool,
    staff_id: i64,
    req: &OrderSaveRequest,
) -> Result<i64, OrderSaveError> {
    let items = validate_items(&req.items)?;
    let table_number = req
        .table_number
        .positive_int()
        .ok_or_else(|| OrderSaveError::InvalidTable(req.table_number.to_string()))?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let order_id = match req.order_id {
        None => order::insert_header(
            &mut *tx,
            req.reservation_id,
            staff_id,
            table_number,
            req.status,
            now,
        )
        .await
        .map_err(OrderSaveError::HeaderUpsert)?,
        Some(id) => {
            order::update_header(&mut *tx, id, staff_id, table_number, req.status, now)
                .await
                .map_err(OrderSaveError::HeaderUpsert)?;
            let removed = order::delete_items(&mut *tx, id)
                .await
                .map_err(OrderSaveError::HeaderUpsert)?;
            tracing::debug!(order_id = id, removed, "Replacing order items");
            id
        }
    };

    let mut total = Decimal::ZERO;
    for (index, item) in items.iter().enumerate() {
        let subtotal = item.subtotal();
        order::insert_item(
            &mut *tx,
            order_id,
            item.menu_item_id,
            item.quantity,
            item.special_requests.as_deref(),
            to_f64(subtotal),
        )
        .await
        .map_err(|source| OrderSaveError::ItemInsert { index, source })?;
        total += subtotal;
    }

    order::update_total(&mut *tx, order_id, to_f64(total))
        .await
        .map_err(OrderSaveError::TotalUpdate)?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        staff_id,
        table = table_number,
        status = req.status.as_str(),
        items = items.len(),
        total = to_f64(total),
        "Order saved"
    );
    Ok(order_id)
}

impl From<sqlx::Error> for OrderSaveError {
    fn from(err: sqlx::Error) -> Self {
        OrderSaveError::Database(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::seed::seed_sample_data;
    use shared::models::{OrderStatus, RawScalar};

    async fn pool() -> SqlitePool {
        let db = DbService::in_memory().await.unwrap();
        seed_sample_data(&db.pool).await.unwrap();
        db.pool
    }

    fn line(menu_item_id: i64, quantity: i64, price: f64) -> RawLineItem {
        RawLineItem {
            menu_item_id: RawScalar::from(menu_item_id),
            quantity: RawScalar::from(quantity),
            price: RawScalar::from(price),
            special_requests: None,
        }
    }

    fn request(items: Vec<RawLineItem>) -> OrderSaveRequest {
        OrderSaveRequest {
            order_id: None,
            reservation_id: None,
            table_number: RawScalar::from(4),
            status: OrderStatus::Placed,
            items,
        }
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await.unwrap()
    }

    #[test]
    fn test_validate_accepts_form_strings() {
        let raw = RawLineItem {
            menu_item_id: RawScalar::from("3"),
            quantity: RawScalar::from(" 2 "),
            price: RawScalar::from("24.99"),
            special_requests: Some("  ".into()),
        };
        let items = validate_items(&[raw]).unwrap();
        assert_eq!(items[0].menu_item_id, 3);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(to_f64(items[0].subtotal()), 49.98);
        assert!(items[0].special_requests.is_none());
    }

    #[test]
    fn test_validate_reports_offending_field() {
        assert!(matches!(validate_items(&[]), Err(OrderSaveError::NoItems)));

        let mut bad = line(1, 1, 8.99);
        bad.quantity = RawScalar::from("two");
        let err = validate_items(&[line(2, 1, 4.99), bad]).unwrap_err();
        match err {
            OrderSaveError::ItemValidation {
                index,
                field,
                value,
            } => {
                assert_eq!(index, 1);
                assert_eq!(field, "quantity");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = validate_items(&[line(1, 1, -1.0)]).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderItemInvalid);
        assert_eq!(app.details.unwrap()["field"], "price");

        assert!(validate_items(&[line(0, 1, 1.0)]).is_err());
    }

    #[tokio::test]
    async fn test_sub_cent_price_rejected() {
        let pool = pool().await;
        let err = save_order(&pool, 1, &request(vec![line(1, 3, 0.125), line(2, 1, 0.004)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderSaveError::ItemValidation { index: 0, field: "price", .. }
        ));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM orders").await, 0);

        let mut cents = line(2, 3, 0.0);
        cents.price = RawScalar::from("0.13");
        let id = save_order(&pool, 1, &request(vec![cents, line(1, 1, 0.01)]))
            .await
            .unwrap();
        let stored: f64 = sqlx::query_scalar("SELECT total_price FROM orders WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, 0.4);
    }

    #[tokio::test]
    async fn test_total_is_sum_of_subtotals() {
        let pool = pool().await;
        let id = save_order(&pool, 1, &request(vec![line(1, 3, 8.99), line(3, 2, 24.99)]))
            .await
            .unwrap();

        let total = count(&pool, "SELECT COUNT(*) FROM order_item").await;
        assert_eq!(total, 2);
        let stored: f64 = sqlx::query_scalar("SELECT total_price FROM orders WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, 76.95);

        let subtotals: Vec<f64> =
            sqlx::query_scalar("SELECT subtotal FROM order_item WHERE order_id = ? ORDER BY id")
                .bind(id)
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(subtotals, vec![26.97, 49.98]);
    }

    #[tokio::test]
    async fn test_failing_item_leaves_no_rows() {
        let pool = pool().await;
        let err = save_order(
            &pool,
            1,
            &request(vec![line(1, 1, 8.99), line(2, 1, 4.99), line(999, 1, 1.0)]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, OrderSaveError::ItemInsert { index: 2, .. }));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM orders").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM order_item").await, 0);

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderItemInsertFailed);
    }

    #[tokio::test]
    async fn test_update_replaces_items() {
        let pool = pool().await;
        let id = save_order(&pool, 1, &request(vec![line(1, 1, 8.99), line(2, 2, 4.99)]))
            .await
            .unwrap();

        let mut update = request(vec![line(5, 1, 7.99)]);
        update.order_id = Some(id);
        update.table_number = RawScalar::from("7");
        update.status = OrderStatus::ReadyForKitchen;
        assert_eq!(save_order(&pool, 2, &update).await.unwrap(), id);

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM orders").await, 1);
        let items = order::find_items(&pool, id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].menu_item_name, "Chocolate Cake");

        let header = order::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(header.table_number, 7);
        assert_eq!(header.staff_id, 2);
        assert_eq!(header.status, OrderStatus::ReadyForKitchen);
        assert_eq!(header.total_price, 7.99);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_items() {
        let pool = pool().await;
        let id = save_order(&pool, 1, &request(vec![line(1, 2, 8.99)]))
            .await
            .unwrap();

        let mut update = request(vec![line(2, 1, 4.99), line(404, 1, 1.0)]);
        update.order_id = Some(id);
        update.table_number = RawScalar::from(9);
        assert!(save_order(&pool, 1, &update).await.is_err());

        let header = order::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(header.table_number, 4);
        assert_eq!(header.total_price, 17.98);
        assert_eq!(order::find_items(&pool, id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_table_number_rejected() {
        let pool = pool().await;
        let mut req = request(vec![line(1, 1, 8.99)]);
        req.table_number = RawScalar::from("patio");
        let err = save_order(&pool, 1, &req).await.unwrap_err();
        assert!(matches!(err, OrderSaveError::InvalidTable(ref v) if v == "patio"));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM orders").await, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let pool = pool().await;
        let mut update = request(vec![line(1, 1, 8.99)]);
        update.order_id = Some(77);
        let err = save_order(&pool, 1, &update).await.unwrap_err();
        assert!(matches!(err, OrderSaveError::HeaderUpsert(RepoError::NotFound(_))));
        assert_eq!(AppError::from(err).code, ErrorCode::OrderNotFound);
    }
}
