use thiserror::Error;

use super::Category;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error("Malformed date '{raw}' on {category} record")]
    MalformedDate { category: Category, raw: String },

    #[error("Unknown dashboard window '{0}' (expected one of 7d, 30d, 90d, 365d, 5y)")]
    UnknownWindow(String),

    #[error("Unknown aggregation mode '{0}' (expected lenient or strict)")]
    UnknownMode(String),
}
