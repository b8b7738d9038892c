use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use hivebook_core::invoices::InvoiceStatus;
use hivebook_core::users as core_users;

/// Profile of the authenticated user.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for UserProfile {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            external_id: u.external_id,
            email: u.email,
            display_name: u.display_name,
            created_at: u.created_at,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// One of 7d, 30d, 90d, 365d, 5y. Defaults to 30d.
    pub window: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectionQuery {
    pub hive_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct InvoiceStatusUpdate {
    pub status: InvoiceStatus,
}
