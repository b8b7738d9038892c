use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::hives::{Hive, NewHive};

use crate::utils::parse_code;

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::hives)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HiveDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub apiary: Option<String>,
    pub hive_type: String,
    pub status: String,
    pub queen_year: Option<i32>,
    pub queen_marked: bool,
    pub installed_on: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column set written on update. Nullable columns are always written so
/// clearing a field in the request clears it in the row.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::hives)]
#[diesel(treat_none_as_null = true)]
pub struct HiveChangesDB {
    pub name: String,
    pub apiary: Option<String>,
    pub hive_type: String,
    pub status: String,
    pub queen_year: Option<i32>,
    pub queen_marked: bool,
    pub installed_on: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl HiveDB {
    pub fn from_new(id: String, user_id: String, new: NewHive, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            apiary: new.apiary,
            hive_type: new.hive_type,
            status: new.status.as_str().to_string(),
            queen_year: new.queen_year,
            queen_marked: new.queen_marked,
            installed_on: new.installed_on,
            latitude: new.latitude,
            longitude: new.longitude,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl HiveChangesDB {
    pub fn from_new(changes: NewHive, now: NaiveDateTime) -> Self {
        Self {
            name: changes.name,
            apiary: changes.apiary,
            hive_type: changes.hive_type,
            status: changes.status.as_str().to_string(),
            queen_year: changes.queen_year,
            queen_marked: changes.queen_marked,
            installed_on: changes.installed_on,
            latitude: changes.latitude,
            longitude: changes.longitude,
            notes: changes.notes,
            updated_at: now,
        }
    }
}

impl From<HiveDB> for Hive {
    fn from(db: HiveDB) -> Self {
        Self {
            status: parse_code(&db.status, "hive status"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            apiary: db.apiary,
            hive_type: db.hive_type,
            queen_year: db.queen_year,
            queen_marked: db.queen_marked,
            installed_on: db.installed_on,
            latitude: db.latitude,
            longitude: db.longitude,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
