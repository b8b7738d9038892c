//! Income domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::INVOICE_INCOME_SOURCE_PREFIX;
use crate::errors::Result;
use crate::utils::validation::{require_non_empty, require_non_negative};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub received_on: NaiveDate,
    pub amount: Decimal,
    pub source: String,
    pub description: Option<String>,
    /// Set when the income was derived from an invoice
    pub invoice_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub received_on: NaiveDate,
    pub amount: Decimal,
    pub source: String,
    pub description: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<String>,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("amount", self.amount)?;
        require_non_empty("source", &self.source)
    }

    /// Income booked for an issued invoice.
    pub fn for_invoice(
        invoice_id: &str,
        invoice_number: &str,
        issued_on: NaiveDate,
        total: Decimal,
    ) -> Self {
        Self {
            received_on: issued_on,
            amount: total,
            source: format!("{INVOICE_INCOME_SOURCE_PREFIX} {invoice_number}"),
            description: None,
            invoice_id: Some(invoice_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_for_invoice_copies_total_and_date() {
        let issued = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let income = NewIncome::for_invoice("inv-1", "2024-007", issued, dec!(42.50));

        assert_eq!(income.source, "Invoice 2024-007");
        assert_eq!(income.amount, dec!(42.50));
        assert_eq!(income.received_on, issued);
        assert_eq!(income.invoice_id.as_deref(), Some("inv-1"));
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_negative_income_rejected() {
        let income = NewIncome {
            received_on: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            amount: dec!(-1),
            source: "Market".to_string(),
            description: None,
            invoice_id: None,
        };
        assert!(income.validate().is_err());
    }
}
