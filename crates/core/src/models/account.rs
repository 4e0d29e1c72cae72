//! Account entity model and DTOs.
//!
//! Accounts use the string-status convention (`"Active"` / `"Inactive"`)
//! and reference a [`Role`](super::Role) and, for museum staff, a
//! [`Museum`](super::Museum).

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{
    deserialize_id, deserialize_opt_id, deserialize_opt_timestamp, EntityId, Timestamp,
};
use crate::validation::{email, optional_text, require_text, FieldErrors, Validate};

/// Minimum password length accepted at account creation.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub role_id: Option<EntityId>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub museum_id: Option<EntityId>,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Account, "Account", email);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub museum_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,
}

impl Validate for CreateAccount {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", &self.email);
        require_text(&mut errors, "fullName", &self.full_name, "Full name");
        require_text(&mut errors, "roleId", &self.role_id, "Role");
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

impl Validate for UpdateAccount {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        optional_text(&mut errors, "fullName", self.full_name.as_deref(), "Full name");
        optional_text(&mut errors, "roleId", self.role_id.as_deref(), "Role");
        errors.into_result()
    }
}
