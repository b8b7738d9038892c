//! Expense domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::{require_non_empty, require_non_negative};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub spent_on: NaiveDate,
    pub amount: Decimal,
    /// Equipment, feed, treatment, ...
    pub category: String,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub spent_on: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub vendor: Option<String>,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("amount", self.amount)?;
        require_non_empty("category", &self.category)
    }
}
