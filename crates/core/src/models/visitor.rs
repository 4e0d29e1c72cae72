//! Visitor entity model.

use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::CoreError;
use crate::status::EntityStatus;
use crate::types::{deserialize_id, deserialize_opt_timestamp, EntityId, Timestamp};
use crate::validation::{require_text, FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default)]
    pub phone_number: String,
    #[serde(flatten)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl_entity!(Visitor, "Visitor", phone_number);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitor {
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

fn check_phone(errors: &mut FieldErrors, phone: &str) {
    require_text(errors, "phoneNumber", phone, "Phone number");
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
    if !phone.trim().is_empty() && (!allowed || !(8..=15).contains(&digits)) {
        errors.add("phoneNumber", "Must be a valid phone number");
    }
}

impl Validate for CreateVisitor {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        check_phone(&mut errors, &self.phone_number);
        errors.into_result()
    }
}

impl Validate for UpdateVisitor {
    fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if let Some(phone) = &self.phone_number {
            check_phone(&mut errors, phone);
        }
        errors.into_result()
    }
}
