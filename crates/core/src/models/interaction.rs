//! Visitor interaction (view, like, comment on an artifact) model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_opt_id, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{max_len, require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub visitor_id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub artifact_id: Option<EntityId>,
    #[serde(default)]
    pub interaction_type: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Interaction, "Interaction", interaction_type);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteraction {
    pub visitor_id: EntityId,
    pub artifact_id: EntityId,
    pub interaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInteraction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Validate for CreateInteraction {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "visitorId", &self.visitor_id, "Visitor");
        require_text(&mut errors, "artifactId", &self.artifact_id, "Artifact");
        require_text(&mut errors, "interactionType", &self.interaction_type, "Interaction type");
        max_len(&mut errors, "content", self.content.as_deref(), 2000);
        errors.into_result()
    }
}

impl Validate for UpdateInteraction {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        max_len(&mut errors, "content", self.content.as_deref(), 2000);
        errors.into_result()
    }
}
