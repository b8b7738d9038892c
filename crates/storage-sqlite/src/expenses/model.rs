use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::expenses::{Expense, NewExpense};

use crate::utils::parse_decimal_tolerant;

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub spent_on: NaiveDate,
    pub amount: String,
    pub category: String,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(treat_none_as_null = true)]
pub struct ExpenseChangesDB {
    pub spent_on: NaiveDate,
    pub amount: String,
    pub category: String,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl ExpenseDB {
    pub fn from_new(id: String, user_id: String, new: NewExpense, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            spent_on: new.spent_on,
            amount: new.amount.to_string(),
            category: new.category,
            vendor: new.vendor,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ExpenseChangesDB {
    pub fn from_new(changes: NewExpense, now: NaiveDateTime) -> Self {
        Self {
            spent_on: changes.spent_on,
            amount: changes.amount.to_string(),
            category: changes.category,
            vendor: changes.vendor,
            description: changes.description,
            updated_at: now,
        }
    }
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            amount: parse_decimal_tolerant(&db.amount, "expense amount"),
            id: db.id,
            user_id: db.user_id,
            spent_on: db.spent_on,
            category: db.category,
            vendor: db.vendor,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
