use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::inspections::{Inspection, NewInspection};

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::inspections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InspectionDB {
    pub id: String,
    pub user_id: String,
    pub hive_id: String,
    pub inspected_on: NaiveDate,
    pub queen_seen: bool,
    pub eggs_seen: bool,
    pub brood_pattern: Option<String>,
    pub temperament: Option<String>,
    pub honey_stores: Option<String>,
    pub varroa_count: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::inspections)]
#[diesel(treat_none_as_null = true)]
pub struct InspectionChangesDB {
    pub hive_id: String,
    pub inspected_on: NaiveDate,
    pub queen_seen: bool,
    pub eggs_seen: bool,
    pub brood_pattern: Option<String>,
    pub temperament: Option<String>,
    pub honey_stores: Option<String>,
    pub varroa_count: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl InspectionDB {
    pub fn from_new(id: String, user_id: String, new: NewInspection, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            hive_id: new.hive_id,
            inspected_on: new.inspected_on,
            queen_seen: new.queen_seen,
            eggs_seen: new.eggs_seen,
            brood_pattern: new.brood_pattern,
            temperament: new.temperament,
            honey_stores: new.honey_stores,
            varroa_count: new.varroa_count,
            weather: new.weather,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<(NewInspection, NaiveDateTime)> for InspectionChangesDB {
    fn from((changes, now): (NewInspection, NaiveDateTime)) -> Self {
        Self {
            hive_id: changes.hive_id,
            inspected_on: changes.inspected_on,
            queen_seen: changes.queen_seen,
            eggs_seen: changes.eggs_seen,
            brood_pattern: changes.brood_pattern,
            temperament: changes.temperament,
            honey_stores: changes.honey_stores,
            varroa_count: changes.varroa_count,
            weather: changes.weather,
            notes: changes.notes,
            updated_at: now,
        }
    }
}

impl From<InspectionDB> for Inspection {
    fn from(db: InspectionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            hive_id: db.hive_id,
            inspected_on: db.inspected_on,
            queen_seen: db.queen_seen,
            eggs_seen: db.eggs_seen,
            brood_pattern: db.brood_pattern,
            temperament: db.temperament,
            honey_stores: db.honey_stores,
            varroa_count: db.varroa_count,
            weather: db.weather,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
