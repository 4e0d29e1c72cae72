//! Domain types for the museum-management portals.
//!
//! Entity models and their request DTOs, the normalized status type, list
//! query and page metadata, and client-side validation. No I/O lives here.

pub mod entity;
pub mod error;
pub mod models;
pub mod pagination;
pub mod status;
pub mod types;
pub mod validation;
