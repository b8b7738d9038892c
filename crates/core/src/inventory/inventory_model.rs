use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::require_non_empty;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        if self.quantity < 0 {
            return Err(Error::invalid(format!(
                "quantity {} cannot be negative",
                self.quantity
            )));
        }
        Ok(())
    }
}
