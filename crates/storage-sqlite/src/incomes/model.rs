use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::incomes::{Income, NewIncome};

use crate::utils::parse_decimal_tolerant;

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncomeDB {
    pub id: String,
    pub user_id: String,
    pub received_on: NaiveDate,
    pub amount: String,
    pub source: String,
    pub description: Option<String>,
    pub invoice_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(treat_none_as_null = true)]
pub struct IncomeChangesDB {
    pub received_on: NaiveDate,
    pub amount: String,
    pub source: String,
    pub description: Option<String>,
    pub invoice_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl IncomeDB {
    pub fn from_new(id: String, user_id: String, new: NewIncome, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            received_on: new.received_on,
            amount: new.amount.to_string(),
            source: new.source,
            description: new.description,
            invoice_id: new.invoice_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl IncomeChangesDB {
    pub fn from_new(changes: NewIncome, now: NaiveDateTime) -> Self {
        Self {
            received_on: changes.received_on,
            amount: changes.amount.to_string(),
            source: changes.source,
            description: changes.description,
            invoice_id: changes.invoice_id,
            updated_at: now,
        }
    }
}

impl From<IncomeDB> for Income {
    fn from(db: IncomeDB) -> Self {
        Self {
            amount: parse_decimal_tolerant(&db.amount, "income amount"),
            id: db.id,
            user_id: db.user_id,
            received_on: db.received_on,
            source: db.source,
            description: db.description,
            invoice_id: db.invoice_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
