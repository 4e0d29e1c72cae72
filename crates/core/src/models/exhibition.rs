//! Exhibition entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_id_list, deserialize_opt_id, deserialize_opt_timestamp, EntityId,
    Timestamp,
};
use crate::validation::{optional_text, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub museum_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub start_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub historical_context_ids: Vec<EntityId>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Exhibition, "Exhibition", name);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExhibition {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub historical_context_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExhibition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_context_ids: Option<Vec<EntityId>>,
}

fn check_window(errors: &mut FieldErrors, start: Option<Timestamp>, end: Option<Timestamp>) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.add("endDate", "End date must not be before start date");
        }
    }
}

impl Validate for CreateExhibition {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Exhibition name");
        check_window(&mut errors, Some(self.start_date), Some(self.end_date));
        if self.priority.is_some_and(|p| p < 0) {
            errors.add("priority", "Must not be negative");
        }
        errors.into_result()
    }
}

impl Validate for UpdateExhibition {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(&mut errors, "name", self.name.as_deref(), "Exhibition name");
        check_window(&mut errors, self.start_date, self.end_date);
        if self.priority.is_some_and(|p| p < 0) {
            errors.add("priority", "Must not be negative");
        }
        errors.into_result()
    }
}
