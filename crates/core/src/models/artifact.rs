//! Artifact entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_opt_id, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{max_len, non_negative, optional_text, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub museum_id: Option<EntityId>,
    #[serde(default)]
    pub artifact_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub period_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_original: Option<bool>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub area_id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub display_position_id: Option<EntityId>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Artifact, "Artifact", name);

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtifact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_original: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_position_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_original: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_position_id: Option<EntityId>,
}

fn check_dimensions(
    errors: &mut FieldErrors,
    weight: Option<f64>,
    height: Option<f64>,
    width: Option<f64>,
    length: Option<f64>,
) {
    non_negative(errors, "weight", weight);
    non_negative(errors, "height", height);
    non_negative(errors, "width", width);
    non_negative(errors, "length", length);
}

impl Validate for CreateArtifact {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Artifact name");
        max_len(&mut errors, "artifactCode", self.artifact_code.as_deref(), 50);
        check_dimensions(&mut errors, self.weight, self.height, self.width, self.length);
        errors.into_result()
    }
}

impl Validate for UpdateArtifact {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(&mut errors, "name", self.name.as_deref(), "Artifact name");
        check_dimensions(&mut errors, self.weight, self.height, self.width, self.length);
        errors.into_result()
    }
}
