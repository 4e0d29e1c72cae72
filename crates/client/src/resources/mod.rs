//! Per-entity REST resources.
//!
//! [`Resource`] binds an entity model to its endpoint path and request DTOs.
//! [`ResourceApi`] is the stateless endpoint set (list, get, create, update,
//! delete, activate); [`ResourceList`] wraps it with list state, a detail
//! cache and refetch-after-mutation. Entity-specific transitions
//! (maintenance, museum assignment, public artifact view) live in the
//! per-entity modules.

use std::marker::PhantomData;

use museum_core::entity::Entity;
use museum_core::pagination::{ListQuery, Page, PagePayload};
use museum_core::status::EntityStatus;
use museum_core::validation::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiResult;

pub mod accounts;
pub mod areas;
pub mod artifacts;
pub mod display_positions;
pub mod exhibitions;
pub mod historical_contexts;
pub mod interactions;
pub mod list;
pub mod museums;
pub mod roles;
pub mod visitors;

pub use list::{ListState, ResourceList};

/// An entity reachable through a REST collection.
pub trait Resource: Entity + Serialize + DeserializeOwned {
    /// Body of `POST {PATH}`.
    type Create: Serialize + Validate + Send + Sync;
    /// Body of `PUT {PATH}/{id}`.
    type Update: Serialize + Validate + Send + Sync;

    /// Collection path, e.g. `/areas`.
    const PATH: &'static str;

    /// Status written into the cached detail as soon as a delete succeeds,
    /// ahead of the refetch. `None` just drops the cached detail.
    const OPTIMISTIC_DELETE: Option<EntityStatus> = None;

    fn item_endpoint(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }

    fn activate_endpoint(id: &str) -> String {
        format!("{}/{}/activate", Self::PATH, id)
    }
}

/// Stateless endpoint set for one resource.
pub struct ResourceApi<E> {
    api: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceApi<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Resource> ResourceApi<E> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch one page.
    ///
    /// The page never holds more than `query.page_size` items, and deleted
    /// entities are dropped unless `query.include_deleted` is set.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<E>> {
        let response = self
            .api
            .get::<PagePayload<E>>(E::PATH, query.to_pairs())
            .await?;
        let mut page = Page::from_payload(response.data, query);
        if !query.include_deleted {
            page.items.retain(|item| !item.status().is_deleted());
        }
        Ok(page)
    }

    pub async fn get(&self, id: &str) -> ApiResult<E> {
        Ok(self.api.get::<E>(&E::item_endpoint(id), Vec::new()).await?.data)
    }

    /// Validate and create. Returns the created record when the server
    /// echoes it back.
    pub async fn create(&self, input: &E::Create) -> ApiResult<Option<E>> {
        input.validate()?;
        let response = self.api.send_raw(ApiRequest::post(E::PATH).json(input)?).await?;
        tracing::info!(entity = E::KIND, "Created");
        Ok(decode_echo(response.data))
    }

    /// Validate and update. Returns the updated record when echoed back.
    pub async fn update(&self, id: &str, input: &E::Update) -> ApiResult<Option<E>> {
        input.validate()?;
        let response = self
            .api
            .send_raw(ApiRequest::put(E::item_endpoint(id)).json(input)?)
            .await?;
        tracing::info!(entity = E::KIND, id, "Updated");
        Ok(decode_echo(response.data))
    }

    /// Soft delete: the server flips the record's status.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&E::item_endpoint(id)).await?;
        tracing::info!(entity = E::KIND, id, "Deleted");
        Ok(())
    }

    pub async fn activate(&self, id: &str) -> ApiResult<()> {
        self.api.patch(&E::activate_endpoint(id)).await?;
        tracing::info!(entity = E::KIND, id, "Activated");
        Ok(())
    }

    /// `PATCH` an arbitrary transition endpoint under this resource.
    pub(crate) async fn transition(&self, endpoint: &str) -> ApiResult<()> {
        self.api.patch(endpoint).await?;
        tracing::info!(entity = E::KIND, endpoint, "Status transition applied");
        Ok(())
    }
}

/// Mutation responses may echo the record, a bare id, or nothing useful.
fn decode_echo<E: DeserializeOwned>(data: serde_json::Value) -> Option<E> {
    if data.is_object() {
        serde_json::from_value(data).ok()
    } else {
        None
    }
}
