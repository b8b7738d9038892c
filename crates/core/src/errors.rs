//! Error types shared by every Hivebook crate.
//!
//! Nothing here knows about Diesel or SQLite. The storage crate converts its
//! own errors into [`DatabaseError`] before they reach a service.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::dashboard::AggregationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),

    /// A multi-step write failed part way and left work undone.
    #[error("Multi-step write failed: {0}")]
    Saga(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    /// True when the requested row does not exist for this user.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::Database(DatabaseError::NotFound(_))
        )
    }
}

/// Storage failures, carried as messages.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must not be negative")]
    NegativeAmount { field: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_covers_both_shapes() {
        assert!(Error::not_found("Hive", "h-1").is_not_found());
        assert!(Error::Database(DatabaseError::NotFound("gone".to_string())).is_not_found());
        assert!(!Error::invalid("bad").is_not_found());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::not_found("Invoice", "inv-9").to_string(),
            "Invoice 'inv-9' not found"
        );
        let err: Error = "2024-13-01"
            .parse::<chrono::NaiveDate>()
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Validation(ValidationError::DateParse(_))));
    }
}
