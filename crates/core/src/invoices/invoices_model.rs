//! Invoice domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{require_non_empty, require_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DRAFT" => Ok(InvoiceStatus::Draft),
            "SENT" => Ok(InvoiceStatus::Sent),
            "PAID" => Ok(InvoiceStatus::Paid),
            other => Err(Error::invalid(format!("unknown invoice status '{other}'"))),
        }
    }
}

/// One line of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl InvoiceItem {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub user_id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub items: Vec<InvoiceItem>,
    pub total: Decimal,
    pub status: InvoiceStatus,
    /// Income booked for this invoice, `None` while booking is pending
    pub income_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub notes: Option<String>,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("invoiceNumber", &self.invoice_number)?;
        require_non_empty("customerName", &self.customer_name)?;
        if self.items.is_empty() {
            return Err(Error::invalid("an invoice needs at least one item"));
        }
        for item in &self.items {
            require_non_empty("items.description", &item.description)?;
            require_non_negative("items.quantity", item.quantity)?;
            require_non_negative("items.unitPrice", item.unit_price)?;
        }
        if let Some(due_on) = self.due_on {
            if due_on < self.issued_on {
                return Err(Error::invalid("due date cannot precede the issue date"));
            }
        }
        Ok(())
    }

    /// Sum of `quantity * unit_price` over all items.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(InvoiceItem::line_total).sum()
    }
}

/// What to do when the income for a freshly created invoice cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceIncomePolicy {
    /// Delete the invoice again and fail the request.
    #[default]
    Compensate,
    /// Keep the invoice and leave the income for `reconcile_invoices`.
    Reconcile,
}

impl FromStr for InvoiceIncomePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compensate" => Ok(InvoiceIncomePolicy::Compensate),
            "reconcile" => Ok(InvoiceIncomePolicy::Reconcile),
            other => Err(Error::invalid(format!(
                "unknown invoice income policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for InvoiceIncomePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceIncomePolicy::Compensate => write!(f, "compensate"),
            InvoiceIncomePolicy::Reconcile => write!(f, "reconcile"),
        }
    }
}

/// Result of creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub income_pending: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub repaired: usize,
    /// Invoices that still have no income
    pub failed: Vec<String>,
}
