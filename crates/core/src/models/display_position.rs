//! Display position (plinth / case slot inside an area) model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_opt_id, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{optional_text, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPosition {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(alias = "name")]
    pub display_position_name: String,
    #[serde(default)]
    pub position_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub area_id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub artifact_id: Option<EntityId>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(DisplayPosition, "DisplayPosition", display_position_name);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisplayPosition {
    pub display_position_name: String,
    pub area_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisplayPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_position_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<EntityId>,
}

impl Validate for CreateDisplayPosition {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(
            &mut errors,
            "displayPositionName",
            &self.display_position_name,
            "Position name",
        );
        require_text(&mut errors, "areaId", &self.area_id, "Area");
        errors.into_result()
    }
}

impl Validate for UpdateDisplayPosition {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(
            &mut errors,
            "displayPositionName",
            self.display_position_name.as_deref(),
            "Position name",
        );
        optional_text(&mut errors, "areaId", self.area_id.as_deref(), "Area");
        errors.into_result()
    }
}
