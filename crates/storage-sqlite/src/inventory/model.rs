use chrono::NaiveDateTime;
use diesel::prelude::*;

use hivebook_core::inventory::{InventoryItem, NewInventoryItem};

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::inventory_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InventoryItemDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::inventory_items)]
#[diesel(treat_none_as_null = true)]
pub struct InventoryItemChangesDB {
    pub name: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl InventoryItemDB {
    pub fn from_new(
        id: String,
        user_id: String,
        new: NewInventoryItem,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            unit: new.unit,
            location: new.location,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl InventoryItemChangesDB {
    pub fn from_new(changes: NewInventoryItem, now: NaiveDateTime) -> Self {
        Self {
            name: changes.name,
            category: changes.category,
            quantity: changes.quantity,
            unit: changes.unit,
            location: changes.location,
            notes: changes.notes,
            updated_at: now,
        }
    }
}

impl From<InventoryItemDB> for InventoryItem {
    fn from(db: InventoryItemDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            category: db.category,
            quantity: db.quantity,
            unit: db.unit,
            location: db.location,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
