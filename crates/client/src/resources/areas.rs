use museum_core::models::{Area, CreateArea, UpdateArea};

use super::Resource;

impl Resource for Area {
    type Create = CreateArea;
    type Update = UpdateArea;

    const PATH: &'static str = "/areas";
}
