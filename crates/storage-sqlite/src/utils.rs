//! Helpers for columns stored as text.

use std::str::FromStr;

use log::warn;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

/// Parses a stored decimal. Values written by older builds as floats are
/// accepted too. Anything unreadable falls back to zero with a warning.
pub fn parse_decimal_tolerant(value: &str, field: &str) -> Decimal {
    if let Ok(d) = Decimal::from_str(value) {
        return d;
    }
    match f64::from_str(value).ok().and_then(Decimal::from_f64) {
        Some(d) => d,
        None => {
            warn!("Failed to parse {} '{}' as a decimal, using 0", field, value);
            Decimal::ZERO
        }
    }
}

/// Parses a stored enum code, falling back to the default on unknown codes.
pub fn parse_code<T>(value: &str, field: &str) -> T
where
    T: FromStr + Default,
{
    value.parse().unwrap_or_else(|_| {
        warn!("Unknown {} '{}' in database, using default", field, value);
        T::default()
    })
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
