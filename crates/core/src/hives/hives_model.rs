//! Hive domain models.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{require_coordinates, require_non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiveStatus {
    #[default]
    Active,
    Inactive,
    Dead,
    Sold,
}

impl HiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveStatus::Active => "ACTIVE",
            HiveStatus::Inactive => "INACTIVE",
            HiveStatus::Dead => "DEAD",
            HiveStatus::Sold => "SOLD",
        }
    }
}

impl FromStr for HiveStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTIVE" => Ok(HiveStatus::Active),
            "INACTIVE" => Ok(HiveStatus::Inactive),
            "DEAD" => Ok(HiveStatus::Dead),
            "SOLD" => Ok(HiveStatus::Sold),
            other => Err(Error::invalid(format!("unknown hive status '{other}'"))),
        }
    }
}

/// Domain model representing a hive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hive {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Yard or apiary the hive stands in
    pub apiary: Option<String>,
    /// Langstroth, top-bar, Warre, ...
    pub hive_type: String,
    pub status: HiveStatus,
    pub queen_year: Option<i32>,
    pub queen_marked: bool,
    pub installed_on: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new hive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHive {
    pub name: String,
    pub apiary: Option<String>,
    pub hive_type: String,
    #[serde(default)]
    pub status: HiveStatus,
    pub queen_year: Option<i32>,
    #[serde(default)]
    pub queen_marked: bool,
    pub installed_on: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

impl NewHive {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("hiveType", &self.hive_type)?;
        require_coordinates(self.latitude, self.longitude)?;
        if let Some(year) = self.queen_year {
            if !(1900..=2200).contains(&year) {
                return Err(Error::invalid(format!("queen year {year} is out of range")));
            }
        }
        Ok(())
    }
}
