//! Money helpers built on `rust_decimal`
//!
//! Amounts are kept as `Decimal` in currency units. Display and submission use
//! 2 decimal places (half away from zero); the payment provider receives
//! integer minor units (cents).

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Minor units per currency unit
const MINOR_UNITS: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// Round to 2 decimal places
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `price × quantity`, unrounded
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Convert a currency amount to integer minor units (×100, rounded)
pub fn to_minor_units(value: Decimal) -> Result<i64, MoneyError> {
    value
        .checked_mul(Decimal::from(MINOR_UNITS))
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_i64())
        .ok_or(MoneyError::OutOfRange(value))
}

/// Format an amount for display, e.g. `$31.97`
pub fn format(value: Decimal) -> String {
    format!("${:.2}", round(value))
}
