//! Harvest domain models.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{require_non_empty, require_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarvestProduct {
    #[default]
    Honey,
    Wax,
    Pollen,
    Propolis,
    Other,
}

impl HarvestProduct {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarvestProduct::Honey => "HONEY",
            HarvestProduct::Wax => "WAX",
            HarvestProduct::Pollen => "POLLEN",
            HarvestProduct::Propolis => "PROPOLIS",
            HarvestProduct::Other => "OTHER",
        }
    }
}

impl FromStr for HarvestProduct {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HONEY" => Ok(HarvestProduct::Honey),
            "WAX" => Ok(HarvestProduct::Wax),
            "POLLEN" => Ok(HarvestProduct::Pollen),
            "PROPOLIS" => Ok(HarvestProduct::Propolis),
            "OTHER" => Ok(HarvestProduct::Other),
            other => Err(Error::invalid(format!("unknown harvest product '{other}'"))),
        }
    }
}

/// Yield taken from one hive (or the whole yard when `hive_id` is empty)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Harvest {
    pub id: String,
    pub user_id: String,
    pub hive_id: Option<String>,
    pub harvested_on: NaiveDate,
    pub product: HarvestProduct,
    pub amount: Decimal,
    /// lb, kg, frames, ...
    pub unit: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHarvest {
    pub hive_id: Option<String>,
    pub harvested_on: NaiveDate,
    #[serde(default)]
    pub product: HarvestProduct,
    pub amount: Decimal,
    pub unit: String,
    pub notes: Option<String>,
}

impl NewHarvest {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("amount", self.amount)?;
        require_non_empty("unit", &self.unit)
    }
}
