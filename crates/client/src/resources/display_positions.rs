use museum_core::models::{CreateDisplayPosition, DisplayPosition, UpdateDisplayPosition};

use super::{Resource, ResourceApi, ResourceList};
use crate::error::ApiResult;

impl Resource for DisplayPosition {
    type Create = CreateDisplayPosition;
    type Update = UpdateDisplayPosition;

    const PATH: &'static str = "/display-positions";
}

impl ResourceApi<DisplayPosition> {
    /// Take a display position out of service for maintenance.
    pub async fn maintain(&self, id: &str) -> ApiResult<()> {
        self.transition(&format!("{}/{}/maintain", DisplayPosition::PATH, id))
            .await
    }
}

impl ResourceList<DisplayPosition> {
    pub async fn maintain(&self, id: &str) -> ApiResult<()> {
        let result = self.api().maintain(id).await;
        self.after_transition(id, result).await
    }
}
