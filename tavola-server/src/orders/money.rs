//! Money calculation using rust_decimal
//!
//! Arithmetic happens on `Decimal`; values are converted to `f64` (rounded to
//! two places) only for storage and serialization.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Largest accepted quantity per line
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal; non-finite input becomes zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// True when `value` has digits below the cent
pub fn has_sub_cent(value: Decimal) -> bool {
    value.normalize().scale() > DECIMAL_PLACES
}

/// Unit price × quantity, rounded to 2 decimal places
pub fn line_subtotal(unit_price: Decimal, quantity: i64) -> Decimal {
    (unit_price * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
