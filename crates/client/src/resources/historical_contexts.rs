use museum_core::models::{CreateHistoricalContext, HistoricalContext, UpdateHistoricalContext};

use super::Resource;

impl Resource for HistoricalContext {
    type Create = CreateHistoricalContext;
    type Update = UpdateHistoricalContext;

    const PATH: &'static str = "/historical-contexts";
}
