use museum_core::models::{CreateExhibition, Exhibition, UpdateExhibition};

use super::Resource;

impl Resource for Exhibition {
    type Create = CreateExhibition;
    type Update = UpdateExhibition;

    const PATH: &'static str = "/exhibitions";
}
