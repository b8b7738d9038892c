use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::harvests::{Harvest, NewHarvest};

use crate::utils::{parse_code, parse_decimal_tolerant};

/// Amounts are stored as decimal strings.
#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::harvests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HarvestDB {
    pub id: String,
    pub user_id: String,
    pub hive_id: Option<String>,
    pub harvested_on: NaiveDate,
    pub product: String,
    pub amount: String,
    pub unit: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::harvests)]
#[diesel(treat_none_as_null = true)]
pub struct HarvestChangesDB {
    pub hive_id: Option<String>,
    pub harvested_on: NaiveDate,
    pub product: String,
    pub amount: String,
    pub unit: String,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl HarvestDB {
    pub fn from_new(id: String, user_id: String, new: NewHarvest, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            hive_id: new.hive_id,
            harvested_on: new.harvested_on,
            product: new.product.as_str().to_string(),
            amount: new.amount.to_string(),
            unit: new.unit,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl HarvestChangesDB {
    pub fn from_new(changes: NewHarvest, now: NaiveDateTime) -> Self {
        Self {
            hive_id: changes.hive_id,
            harvested_on: changes.harvested_on,
            product: changes.product.as_str().to_string(),
            amount: changes.amount.to_string(),
            unit: changes.unit,
            notes: changes.notes,
            updated_at: now,
        }
    }
}

impl From<HarvestDB> for Harvest {
    fn from(db: HarvestDB) -> Self {
        Self {
            product: parse_code(&db.product, "harvest product"),
            amount: parse_decimal_tolerant(&db.amount, "harvest amount"),
            id: db.id,
            user_id: db.user_id,
            hive_id: db.hive_id,
            harvested_on: db.harvested_on,
            unit: db.unit,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
