//! Entity models and request DTOs, one module per resource.
//!
//! Models mirror the API's camelCase JSON. Every model carries a flattened
//! [`EntityStatus`](crate::status::EntityStatus) resolved at decode time.

pub mod account;
pub mod area;
pub mod artifact;
pub mod display_position;
pub mod exhibition;
pub mod historical_context;
pub mod interaction;
pub mod museum;
pub mod role;
pub mod visitor;

pub use account::{Account, CreateAccount, UpdateAccount};
pub use area::{Area, CreateArea, UpdateArea};
pub use artifact::{Artifact, CreateArtifact, UpdateArtifact};
pub use display_position::{CreateDisplayPosition, DisplayPosition, UpdateDisplayPosition};
pub use exhibition::{CreateExhibition, Exhibition, UpdateExhibition};
pub use historical_context::{CreateHistoricalContext, HistoricalContext, UpdateHistoricalContext};
pub use interaction::{CreateInteraction, Interaction, UpdateInteraction};
pub use museum::{CreateMuseum, Museum, UpdateMuseum};
pub use role::{CreateRole, Role, UpdateRole};
pub use visitor::{CreateVisitor, UpdateVisitor, Visitor};
