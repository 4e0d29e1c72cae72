use crate::status::EntityStatus;
use crate::types::{EntityId, Timestamp};

/// Common surface of every server-owned record.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity name, e.g. `"Artifact"`.
    const KIND: &'static str;

    fn id(&self) -> &EntityId;

    fn status(&self) -> EntityStatus;

    /// Short label for lists and log lines.
    fn label(&self) -> &str;

    /// Overwrite the status locally and stamp `updatedAt`.
    fn mark(&mut self, status: EntityStatus, at: Timestamp);
}

/// Implement [`Entity`] for a model with `id`, `status` and `updated_at`
/// fields, naming the field used as its label.
macro_rules! impl_entity {
    ($ty:ty, $kind:literal, $label:ident) => {
        impl $crate::entity::Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &$crate::types::EntityId {
                &self.id
            }

            fn status(&self) -> $crate::status::EntityStatus {
                self.status
            }

            fn label(&self) -> &str {
                &self.$label
            }

            fn mark(&mut self, status: $crate::status::EntityStatus, at: $crate::types::Timestamp) {
                self.status = status;
                self.updated_at = Some(at);
            }
        }
    };
}

pub(crate) use impl_entity;
