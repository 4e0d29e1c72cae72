//! Artifacts: maintenance transition and the public (visitor) view.

use museum_core::models::{Artifact, CreateArtifact, UpdateArtifact};

use super::{Resource, ResourceApi, ResourceList};
use crate::api::{ApiRequest, AuthMode};
use crate::error::ApiResult;

impl Resource for Artifact {
    type Create = CreateArtifact;
    type Update = UpdateArtifact;

    const PATH: &'static str = "/artifacts";
}

fn maintain_endpoint(id: &str) -> String {
    format!("{}/{}/maintain", Artifact::PATH, id)
}

impl ResourceApi<Artifact> {
    /// Put an artifact under maintenance (`PATCH /artifacts/{id}/maintain`).
    pub async fn maintain(&self, id: &str) -> ApiResult<()> {
        self.transition(&maintain_endpoint(id)).await
    }

    /// Fetch an artifact with the anonymous visitor token, as the public
    /// artifact page does.
    pub async fn get_public(&self, id: &str) -> ApiResult<Artifact> {
        let request = ApiRequest::get(Artifact::item_endpoint(id)).auth(AuthMode::Visitor);
        Ok(self.client().send::<Artifact>(request).await?.data)
    }
}

impl ResourceList<Artifact> {
    pub async fn maintain(&self, id: &str) -> ApiResult<()> {
        let result = self.api().maintain(id).await;
        self.after_transition(id, result).await
    }
}
