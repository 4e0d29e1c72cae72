use museum_core::models::{CreateVisitor, UpdateVisitor, Visitor};

use super::Resource;

/// The visitor collection is singular on the server.
impl Resource for Visitor {
    type Create = CreateVisitor;
    type Update = UpdateVisitor;

    const PATH: &'static str = "/visitor";
}
