//! Client-side form validation.
//!
//! DTOs are checked before they are sent so that field errors can be shown
//! inline without a round trip. Field errors use the same
//! `field -> [messages]` shape the API returns in its `errors` map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Field-level validation messages keyed by camelCase field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded, otherwise a [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Implemented by request DTOs that can be checked before submission.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

/// Require a non-blank string.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    }
}

/// Require a non-blank string when one was supplied (partial updates).
pub fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, label: &str) {
    if let Some(v) = value {
        require_text(errors, field, v, label);
    }
}

/// Enforce an upper bound on string length, counted in characters.
pub fn max_len(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.add(field, format!("Must be at most {max} characters"));
        }
    }
}

/// Reject negative measurements.
pub fn non_negative(errors: &mut FieldErrors, field: &str, value: Option<f64>) {
    if let Some(v) = value {
        if v < 0.0 {
            errors.add(field, "Must not be negative");
        }
    }
}

/// Minimal shape check for an email address.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid {
        errors.add(field, "Must be a valid email address");
    }
}
