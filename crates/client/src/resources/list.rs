//! Stateful list controller for one resource.
//!
//! Holds `{items, loading, error, pagination}` for the current query, a TTL
//! cache of fetched details, and mutation helpers that refetch the current
//! page after every call that reached the server.
//!
//! Every fetch takes a ticket from a monotonically increasing counter. When
//! it completes, its result is applied only if no later fetch has started;
//! otherwise it is dropped, so a slow response to an old query can never
//! overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use museum_core::entity::Entity;
use museum_core::pagination::{ListQuery, Pagination};
use museum_core::types::EntityId;
use tokio::sync::RwLock;

use super::{Resource, ResourceApi};
use crate::api::ApiClient;
use crate::cache::TtlCache;
use crate::error::{ApiError, ApiResult};

/// Current list state, as rendered by a table view.
#[derive(Debug, Clone)]
pub struct ListState<E> {
    pub items: Vec<E>,
    pub loading: bool,
    /// Message of the last failed fetch, if it failed for a reason other
    /// than missing authorization.
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl<E> ListState<E> {
    fn idle(query: &ListQuery) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::new(query.page_index, query.page_size, 0),
        }
    }
}

pub struct ResourceList<E: Resource> {
    api: ResourceApi<E>,
    query: RwLock<ListQuery>,
    state: RwLock<ListState<E>>,
    latest: AtomicU64,
    details: TtlCache<EntityId, E>,
}

impl<E: Resource> ResourceList<E> {
    /// Create a controller with an initial query. Nothing is fetched yet.
    pub fn new(api: ApiClient, query: ListQuery, detail_ttl: Duration) -> Self {
        Self {
            api: ResourceApi::new(api),
            state: RwLock::new(ListState::idle(&query)),
            query: RwLock::new(query),
            latest: AtomicU64::new(0),
            details: TtlCache::new(detail_ttl),
        }
    }

    pub fn api(&self) -> &ResourceApi<E> {
        &self.api
    }

    pub async fn state(&self) -> ListState<E> {
        self.state.read().await.clone()
    }

    pub async fn query(&self) -> ListQuery {
        self.query.read().await.clone()
    }

    /// Make `query` current and fetch it.
    ///
    /// A 401/403 answer yields an empty list without an error so views that
    /// render before login stay quiet. Other failures keep the previous items
    /// and record the error message.
    pub async fn fetch(&self, query: ListQuery) -> ListState<E> {
        let ticket = {
            let mut current = self.query.write().await;
            *current = query.clone();
            self.latest.fetch_add(1, Ordering::SeqCst) + 1
        };
        {
            // A newer fetch may already have finished; only it clears `loading`.
            let mut state = self.state.write().await;
            if self.latest.load(Ordering::SeqCst) == ticket {
                state.loading = true;
            }
        }

        let result = self.api.list(&query).await;

        let mut state = self.state.write().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!(
                entity = E::KIND,
                ticket,
                page_index = query.page_index,
                "Discarding stale list response",
            );
            return state.clone();
        }

        match result {
            Ok(page) => {
                state.items = page.items;
                state.pagination = page.pagination;
                state.error = None;
            }
            Err(e) if e.is_auth_failure() => {
                tracing::debug!(
                    entity = E::KIND,
                    status = e.status_code(),
                    "List not authorized; showing empty list",
                );
                state.items.clear();
                state.pagination = Pagination::new(query.page_index, query.page_size, 0);
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(entity = E::KIND, error = %e, "List fetch failed");
                state.error = Some(e.message());
            }
        }
        state.loading = false;
        state.clone()
    }

    /// Fetch the current query again.
    pub async fn refetch(&self) -> ListState<E> {
        let query = self.query().await;
        self.fetch(query).await
    }

    pub async fn set_page(&self, page_index: u32) -> ListState<E> {
        let query = self.query().await.page(page_index);
        self.fetch(query).await
    }

    /// Change the page size and go back to the first page.
    pub async fn set_page_size(&self, page_size: u32) -> ListState<E> {
        let query = self.query().await.page_size(page_size).page(1);
        self.fetch(query).await
    }

    pub async fn set_search(&self, term: &str) -> ListState<E> {
        let query = self.query().await.search(term).page(1);
        self.fetch(query).await
    }

    pub async fn set_filter(&self, field: &str, value: &str) -> ListState<E> {
        let query = self.query().await.filter(field, value).page(1);
        self.fetch(query).await
    }

    pub async fn set_include_deleted(&self, include: bool) -> ListState<E> {
        let query = self.query().await.include_deleted(include);
        self.fetch(query).await
    }

    /// Entity by id, served from the detail cache while fresh.
    pub async fn get(&self, id: &str) -> ApiResult<E> {
        let key = id.to_string();
        if let Some(hit) = self.details.get(&key) {
            return Ok(hit);
        }
        let entity = self.api.get(id).await?;
        self.details.insert(key, entity.clone());
        Ok(entity)
    }

    /// Cached detail without touching the network.
    pub fn cached(&self, id: &str) -> Option<E> {
        self.details.get(&id.to_string())
    }

    pub async fn create(&self, input: &E::Create) -> ApiResult<Option<E>> {
        let result = self.api.create(input).await;
        if let Ok(Some(entity)) = &result {
            self.details.insert(entity.id().clone(), entity.clone());
        }
        self.settle(result).await
    }

    pub async fn update(&self, id: &str, input: &E::Update) -> ApiResult<Option<E>> {
        let result = self.api.update(id, input).await;
        match &result {
            Ok(Some(entity)) => self.details.insert(id.to_string(), entity.clone()),
            Ok(None) => self.details.invalidate(&id.to_string()),
            Err(_) => {}
        }
        self.settle(result).await
    }

    /// Soft delete, then refetch.
    ///
    /// Resources with an [`OPTIMISTIC_DELETE`](Resource::OPTIMISTIC_DELETE)
    /// status have their cached detail marked as soon as the server accepts
    /// the delete; the rest drop it.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let result = self.api.delete(id).await;
        if result.is_ok() {
            let key = id.to_string();
            match E::OPTIMISTIC_DELETE {
                Some(status) => {
                    let now = chrono::Utc::now();
                    self.details.update(&key, |entity| entity.mark(status, now));
                }
                None => self.details.invalidate(&key),
            }
        }
        self.settle(result).await
    }

    pub async fn activate(&self, id: &str) -> ApiResult<()> {
        let result = self.api.activate(id).await;
        self.after_transition(id, result).await
    }

    /// Drop the cached detail after a server-side status change, then
    /// refetch.
    pub(crate) async fn after_transition(&self, id: &str, result: ApiResult<()>) -> ApiResult<()> {
        if result.is_ok() {
            self.details.invalidate(&id.to_string());
        }
        self.settle(result).await
    }

    /// Refetch the current page after any mutation that reached the server,
    /// successful or not. The mutation's own error goes back to the caller
    /// and never into list state.
    async fn settle<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if !matches!(result, Err(ApiError::Validation(_) | ApiError::InvalidRequest(_))) {
            self.refetch().await;
        }
        result
    }
}
