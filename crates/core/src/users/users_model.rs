//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::validation::{normalize_optional, require_non_empty};
use crate::Result;

/// Local user, owner of every other record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Subject identifier issued by the external auth provider
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Identity asserted by the auth provider for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthIdentity {
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl AuthIdentity {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            email: None,
            display_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("externalId", &self.external_id)
    }
}

impl From<AuthIdentity> for NewUser {
    fn from(identity: AuthIdentity) -> Self {
        Self {
            external_id: identity.external_id.trim().to_string(),
            email: normalize_optional(identity.email),
            display_name: normalize_optional(identity.display_name),
        }
    }
}
