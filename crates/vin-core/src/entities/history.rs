use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::enums::OperationType;

/// Who did what to which component, and when.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryHistory {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub component_id: i64,
    pub user_id: String,
    pub operation_type: OperationType,
    /// Snapshot of the user's name, kept by the server in case the user is
    /// later removed from the directory.
    #[serde(default)]
    pub user_name: String,
    /// Client-side: resolved from `userId`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl InventoryHistory {
    /// A new entry to `POST /inventory-history`. The server assigns the id and
    /// fills `userName`.
    #[must_use]
    pub fn record(component_id: i64, user_id: impl Into<String>, operation: OperationType) -> Self {
        Self {
            id: 0,
            created_at: Utc::now(),
            component_id,
            user_id: user_id.into(),
            operation_type: operation,
            user_name: String::new(),
            user: None,
        }
    }

    /// Name to show for the acting user: the resolved user, else the snapshot,
    /// else the raw id.
    #[must_use]
    pub fn actor_label(&self) -> String {
        if let Some(user) = &self.user {
            return user.label();
        }
        if !self.user_name.trim().is_empty() {
            return self.user_name.clone();
        }
        self.user_id.clone()
    }
}

/// A user's history entry with the component's serial number attached.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInventoryHistory {
    #[serde(flatten)]
    pub entry: InventoryHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_serial_number: Option<String>,
}

impl From<InventoryHistory> for UserInventoryHistory {
    fn from(entry: InventoryHistory) -> Self {
        Self {
            entry,
            component_serial_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_starts_unsaved() {
        let entry = InventoryHistory::record(4, "u-9", OperationType::Assigned);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 0);
        assert_eq!(value["componentId"], 4);
        assert_eq!(value["userId"], "u-9");
        assert_eq!(value["operationType"], "Assigned");
        assert_eq!(value["userName"], "");
        assert!(value.get("user").is_none());
    }

    #[test]
    fn actor_label_prefers_resolved_user() {
        let mut entry = InventoryHistory::record(1, "u-1", OperationType::Returned);
        assert_eq!(entry.actor_label(), "u-1");
        entry.user_name = "Snap Shot".into();
        assert_eq!(entry.actor_label(), "Snap Shot");
        entry.user = Some(User {
            display_name: Some("Live Name".into()),
            ..User::default()
        });
        assert_eq!(entry.actor_label(), "Live Name");
    }

    #[test]
    fn user_history_flattens_entry_fields() {
        let mut row = UserInventoryHistory::from(InventoryHistory::record(
            2,
            "u-2",
            OperationType::Added,
        ));
        row.component_serial_number = Some("SN-2".into());
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["componentId"], 2);
        assert_eq!(value["componentSerialNumber"], "SN-2");
    }
}
