//! Area (gallery wing / room) entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_opt_id, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{max_len, optional_text, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub museum_id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Area, "Area", name);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArea {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub museum_id: Option<EntityId>,
}

impl CreateArea {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            museum_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for CreateArea {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Area name");
        max_len(&mut errors, "name", Some(&self.name), 100);
        max_len(&mut errors, "description", self.description.as_deref(), 1000);
        errors.into_result()
    }
}

impl Validate for UpdateArea {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(&mut errors, "name", self.name.as_deref(), "Area name");
        max_len(&mut errors, "name", self.name.as_deref(), 100);
        max_len(&mut errors, "description", self.description.as_deref(), 1000);
        errors.into_result()
    }
}
