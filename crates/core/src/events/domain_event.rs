//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::dashboard::Category;

/// Domain events emitted by core services after successful mutations.
///
/// Events are facts about data changes. The server wires a sink that
/// translates them into side effects such as dropping cached dashboards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Records feeding a dashboard series were created, updated, or deleted.
    DashboardRecordsChanged { user_id: String, category: Category },

    /// An invoice was created, updated, or deleted.
    InvoicesChanged {
        user_id: String,
        invoice_ids: Vec<String>,
    },
}

impl DomainEvent {
    pub fn harvests_changed(user_id: impl Into<String>) -> Self {
        Self::DashboardRecordsChanged {
            user_id: user_id.into(),
            category: Category::Harvest,
        }
    }

    pub fn incomes_changed(user_id: impl Into<String>) -> Self {
        Self::DashboardRecordsChanged {
            user_id: user_id.into(),
            category: Category::Income,
        }
    }

    pub fn expenses_changed(user_id: impl Into<String>) -> Self {
        Self::DashboardRecordsChanged {
            user_id: user_id.into(),
            category: Category::Expense,
        }
    }

    pub fn invoices_changed(user_id: impl Into<String>, invoice_ids: Vec<String>) -> Self {
        Self::InvoicesChanged {
            user_id: user_id.into(),
            invoice_ids,
        }
    }

    /// The user whose data changed.
    pub fn user_id(&self) -> &str {
        match self {
            Self::DashboardRecordsChanged { user_id, .. } => user_id,
            Self::InvoicesChanged { user_id, .. } => user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::harvests_changed("user-1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "dashboard_records_changed");
        assert_eq!(json["user_id"], "user-1");
        assert_eq!(json["category"], "harvest");

        let back: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_user_id_accessor() {
        let event = DomainEvent::invoices_changed("user-2", vec!["inv-1".to_string()]);
        assert_eq!(event.user_id(), "user-2");
    }
}
