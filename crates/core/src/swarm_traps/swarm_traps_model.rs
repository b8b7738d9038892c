//! Swarm trap domain models.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{require_coordinates, require_non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwarmTrapStatus {
    #[default]
    Active,
    Captured,
    Removed,
}

impl SwarmTrapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwarmTrapStatus::Active => "ACTIVE",
            SwarmTrapStatus::Captured => "CAPTURED",
            SwarmTrapStatus::Removed => "REMOVED",
        }
    }
}

impl FromStr for SwarmTrapStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTIVE" => Ok(SwarmTrapStatus::Active),
            "CAPTURED" => Ok(SwarmTrapStatus::Captured),
            "REMOVED" => Ok(SwarmTrapStatus::Removed),
            other => Err(Error::invalid(format!("unknown swarm trap status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwarmTrap {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: NaiveDate,
    pub status: SwarmTrapStatus,
    pub captured_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSwarmTrap {
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: NaiveDate,
    #[serde(default)]
    pub status: SwarmTrapStatus,
    pub captured_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewSwarmTrap {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_coordinates(self.latitude, self.longitude)?;
        match (self.status, self.captured_on) {
            (SwarmTrapStatus::Captured, None) => {
                Err(Error::invalid("a captured trap needs a capture date"))
            }
            (SwarmTrapStatus::Captured, Some(captured)) if captured < self.installed_on => Err(
                Error::invalid("capture date cannot precede the install date"),
            ),
            (SwarmTrapStatus::Captured, Some(_)) => Ok(()),
            (_, Some(_)) => Err(Error::invalid(
                "capture date is only allowed for captured traps",
            )),
            (_, None) => Ok(()),
        }
    }
}
