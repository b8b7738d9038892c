//! Field checks shared by the entity services.

use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};

pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

pub fn require_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<()> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ValidationError::InvalidInput(format!(
                    "latitude {lat} is out of range"
                ))
                .into());
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ValidationError::InvalidInput(format!(
                    "longitude {lng} is out of range"
                ))
                .into());
            }
            Ok(())
        }
        _ => Err(ValidationError::InvalidInput(
            "latitude and longitude must be provided together".to_string(),
        )
        .into()),
    }
}

/// Trims the value and maps blank strings to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
