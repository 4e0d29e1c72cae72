//! Per-portal wiring of client, session and list controllers.
//!
//! A [`PortalContext`] is built once by the caller and handed to whatever
//! needs API access. Nothing here is global; two contexts over two storages
//! are fully independent sessions.

use std::sync::Arc;
use std::time::Duration;

use museum_core::pagination::ListQuery;

use crate::api::ApiClient;
use crate::auth::AuthSession;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::resources::{Resource, ResourceApi, ResourceList};
use crate::storage::SessionStorage;

#[derive(Clone)]
pub struct PortalContext {
    api: ApiClient,
    session: Arc<AuthSession>,
    detail_ttl: Duration,
}

impl PortalContext {
    pub fn new(config: &ClientConfig, storage: Arc<dyn SessionStorage>) -> ApiResult<Self> {
        let api = ApiClient::new(config, storage)?;
        Ok(Self {
            session: Arc::new(AuthSession::new(api.clone())),
            api,
            detail_ttl: config.detail_cache_ttl,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    /// Stateless endpoints for `E`.
    pub fn resource<E: Resource>(&self) -> ResourceApi<E> {
        ResourceApi::new(self.api.clone())
    }

    /// A fresh list controller for `E` starting at `query`.
    pub fn list<E: Resource>(&self, query: ListQuery) -> ResourceList<E> {
        ResourceList::new(self.api.clone(), query, self.detail_ttl)
    }
}
