use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::invoices::{Invoice, InvoiceItem, NewInvoice};

use crate::utils::{parse_code, parse_decimal_tolerant};

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceDB {
    pub id: String,
    pub user_id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    /// Sum of the item lines, as a decimal string
    pub total: String,
    pub status: String,
    pub income_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(InvoiceDB, foreign_key = invoice_id))]
#[diesel(table_name = crate::schema::invoice_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceItemDB {
    pub id: String,
    pub invoice_id: String,
    pub position: i32,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
}

impl InvoiceDB {
    pub fn from_new(id: String, user_id: String, new: &NewInvoice, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            invoice_number: new.invoice_number.clone(),
            customer_name: new.customer_name.clone(),
            customer_email: new.customer_email.clone(),
            issued_on: new.issued_on,
            due_on: new.due_on,
            total: new.total().to_string(),
            status: new.status.as_str().to_string(),
            income_id: None,
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_domain(self, items: Vec<InvoiceItemDB>) -> Invoice {
        Invoice {
            total: parse_decimal_tolerant(&self.total, "invoice total"),
            status: parse_code(&self.status, "invoice status"),
            items: items.into_iter().map(InvoiceItem::from).collect(),
            id: self.id,
            user_id: self.user_id,
            invoice_number: self.invoice_number,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            issued_on: self.issued_on,
            due_on: self.due_on,
            income_id: self.income_id,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl InvoiceItemDB {
    pub fn from_item(id: String, invoice_id: &str, position: i32, item: &InvoiceItem) -> Self {
        Self {
            id,
            invoice_id: invoice_id.to_string(),
            position,
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
        }
    }
}

impl From<InvoiceItemDB> for InvoiceItem {
    fn from(db: InvoiceItemDB) -> Self {
        Self {
            quantity: parse_decimal_tolerant(&db.quantity, "invoice item quantity"),
            unit_price: parse_decimal_tolerant(&db.unit_price, "invoice item unit price"),
            description: db.description,
        }
    }
}
