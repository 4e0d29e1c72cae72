//! Normalized entity status.
//!
//! The API reports lifecycle state in two conventions depending on the
//! entity: an `isActive`/`isDeleted` flag pair, or a `status` string. Both
//! are folded into a single [`EntityStatus`] when a payload is decoded so
//! nothing downstream has to guess which one it got.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "StatusFields", into = "StatusFields")]
pub enum EntityStatus {
    Active,
    #[default]
    Inactive,
    Maintenance,
    Deleted,
}

impl EntityStatus {
    /// The wire spelling used by string-status entities.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityStatus::Active => "Active",
            EntityStatus::Inactive => "Inactive",
            EntityStatus::Maintenance => "Maintenance",
            EntityStatus::Deleted => "Deleted",
        }
    }

    pub fn is_active(self) -> bool {
        self == EntityStatus::Active
    }

    pub fn is_deleted(self) -> bool {
        self == EntityStatus::Deleted
    }

    /// Case-insensitive parse of a status string; `None` when unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" | "activated" => Some(EntityStatus::Active),
            "inactive" | "deactivated" | "disabled" => Some(EntityStatus::Inactive),
            "maintenance" | "undermaintenance" | "under_maintenance" | "maintaining" => {
                Some(EntityStatus::Maintenance)
            }
            "deleted" | "removed" => Some(EntityStatus::Deleted),
            _ => None,
        }
    }

    /// Resolve the status from whichever fields the server sent.
    ///
    /// `isDeleted` wins, then a recognized `status` string, then `isActive`.
    /// A payload with none of them reads as inactive.
    pub fn resolve(status: Option<&str>, is_active: Option<bool>, is_deleted: Option<bool>) -> Self {
        if is_deleted == Some(true) {
            return EntityStatus::Deleted;
        }
        if let Some(parsed) = status.and_then(EntityStatus::parse) {
            return parsed;
        }
        match is_active {
            Some(true) => EntityStatus::Active,
            _ => EntityStatus::Inactive,
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityStatus::parse(s).ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

/// Raw status fields as they appear on the wire.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusFields {
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    is_deleted: Option<bool>,
}

impl From<StatusFields> for EntityStatus {
    fn from(raw: StatusFields) -> Self {
        let status = raw.status.as_ref().and_then(serde_json::Value::as_str);
        EntityStatus::resolve(status, raw.is_active, raw.is_deleted)
    }
}

impl From<EntityStatus> for StatusFields {
    fn from(status: EntityStatus) -> Self {
        StatusFields {
            status: Some(serde_json::Value::String(status.as_str().to_string())),
            is_active: Some(status.is_active()),
            is_deleted: Some(status.is_deleted()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        name: String,
        #[serde(flatten)]
        status: EntityStatus,
    }

    fn decode(json: serde_json::Value) -> EntityStatus {
        serde_json::from_value::<Row>(json).unwrap().status
    }

    #[test]
    fn flag_pair_convention() {
        let json = serde_json::json!({"name": "a", "isActive": true, "isDeleted": false});
        assert_eq!(decode(json), EntityStatus::Active);

        let json = serde_json::json!({"name": "a", "isActive": false});
        assert_eq!(decode(json), EntityStatus::Inactive);
    }

    #[test]
    fn string_convention() {
        let json = serde_json::json!({"name": "a", "status": "Active"});
        assert_eq!(decode(json), EntityStatus::Active);

        let json = serde_json::json!({"name": "a", "status": "UnderMaintenance"});
        assert_eq!(decode(json), EntityStatus::Maintenance);
    }

    #[test]
    fn deleted_flag_wins() {
        let json = serde_json::json!({"name": "a", "status": "Active", "isDeleted": true});
        assert_eq!(decode(json), EntityStatus::Deleted);
    }

    #[test]
    fn string_beats_active_flag() {
        let json = serde_json::json!({"name": "a", "status": "Maintenance", "isActive": true});
        assert_eq!(decode(json), EntityStatus::Maintenance);
    }

    #[test]
    fn unknown_or_missing_is_inactive() {
        assert_eq!(decode(serde_json::json!({"name": "a"})), EntityStatus::Inactive);
        assert_eq!(
            decode(serde_json::json!({"name": "a", "status": 3})),
            EntityStatus::Inactive
        );
        assert_eq!(
            decode(serde_json::json!({"name": "a", "status": "Pending", "isActive": true})),
            EntityStatus::Active
        );
    }

    #[test]
    fn serializes_both_conventions() {
        let row = Row {
            name: "a".into(),
            status: EntityStatus::Deleted,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["status"], "Deleted");
        assert_eq!(json["isActive"], false);
        assert_eq!(json["isDeleted"], true);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!("inactive".parse::<EntityStatus>().unwrap(), EntityStatus::Inactive);
        assert!(matches!(
            "archived".parse::<EntityStatus>(),
            Err(CoreError::UnknownStatus(_))
        ));
    }
}
