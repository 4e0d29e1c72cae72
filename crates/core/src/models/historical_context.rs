//! Historical context (period write-up linked to artifacts) model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_id_list, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{optional_text, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalContext {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub artifact_ids: Vec<EntityId>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(HistoricalContext, "HistoricalContext", title);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoricalContext {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifact_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoricalContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_ids: Option<Vec<EntityId>>,
}

impl Validate for CreateHistoricalContext {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title, "Title");
        errors.into_result()
    }
}

impl Validate for UpdateHistoricalContext {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(&mut errors, "title", self.title.as_deref(), "Title");
        errors.into_result()
    }
}
