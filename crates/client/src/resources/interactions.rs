use museum_core::models::{CreateInteraction, Interaction, UpdateInteraction};

use super::Resource;

/// The interaction collection is singular on the server.
impl Resource for Interaction {
    type Create = CreateInteraction;
    type Update = UpdateInteraction;

    const PATH: &'static str = "/interaction";
}
