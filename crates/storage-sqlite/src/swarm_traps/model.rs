use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use hivebook_core::swarm_traps::{NewSwarmTrap, SwarmTrap};

use crate::utils::parse_code;

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::swarm_traps)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SwarmTrapDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: NaiveDate,
    pub status: String,
    pub captured_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::swarm_traps)]
#[diesel(treat_none_as_null = true)]
pub struct SwarmTrapChangesDB {
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: NaiveDate,
    pub status: String,
    pub captured_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl SwarmTrapDB {
    pub fn from_new(id: String, user_id: String, new: NewSwarmTrap, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            location: new.location,
            latitude: new.latitude,
            longitude: new.longitude,
            installed_on: new.installed_on,
            status: new.status.as_str().to_string(),
            captured_on: new.captured_on,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SwarmTrapChangesDB {
    pub fn from_new(changes: NewSwarmTrap, now: NaiveDateTime) -> Self {
        Self {
            name: changes.name,
            location: changes.location,
            latitude: changes.latitude,
            longitude: changes.longitude,
            installed_on: changes.installed_on,
            status: changes.status.as_str().to_string(),
            captured_on: changes.captured_on,
            notes: changes.notes,
            updated_at: now,
        }
    }
}

impl From<SwarmTrapDB> for SwarmTrap {
    fn from(db: SwarmTrapDB) -> Self {
        Self {
            status: parse_code(&db.status, "swarm trap status"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            location: db.location,
            latitude: db.latitude,
            longitude: db.longitude,
            installed_on: db.installed_on,
            captured_on: db.captured_on,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
