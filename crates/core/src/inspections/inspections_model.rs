//! Inspection domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::require_non_empty;

/// One visit to a hive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub user_id: String,
    pub hive_id: String,
    pub inspected_on: NaiveDate,
    pub queen_seen: bool,
    pub eggs_seen: bool,
    pub brood_pattern: Option<String>,
    pub temperament: Option<String>,
    pub honey_stores: Option<String>,
    /// Mites counted in the wash or sticky board sample
    pub varroa_count: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInspection {
    pub hive_id: String,
    pub inspected_on: NaiveDate,
    #[serde(default)]
    pub queen_seen: bool,
    #[serde(default)]
    pub eggs_seen: bool,
    pub brood_pattern: Option<String>,
    pub temperament: Option<String>,
    pub honey_stores: Option<String>,
    pub varroa_count: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
}

impl NewInspection {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("hiveId", &self.hive_id)?;
        if matches!(self.varroa_count, Some(count) if count < 0) {
            return Err(Error::invalid("varroa count must not be negative"));
        }
        Ok(())
    }
}
