use museum_core::models::{CreateMuseum, Museum, UpdateMuseum};

use super::Resource;

impl Resource for Museum {
    type Create = CreateMuseum;
    type Update = UpdateMuseum;

    const PATH: &'static str = "/museums";
}
