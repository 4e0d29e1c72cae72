//! Typed client for the museum-management REST API.
//!
//! Provides the HTTP wrapper with envelope normalization and bearer-token
//! injection, session storage, the auth session, a TTL detail cache, and
//! per-entity list controllers used by the admin and museum-staff portals.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod resources;
pub mod storage;

pub use api::{ApiClient, ApiRequest, ApiResponse, AuthMode};
pub use auth::{AuthSession, AuthState, SessionUser};
pub use config::ClientConfig;
pub use context::PortalContext;
pub use error::ApiError;
pub use resources::{ListState, Resource, ResourceApi, ResourceList};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
