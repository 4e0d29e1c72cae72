use museum_core::models::{CreateRole, Role, UpdateRole};

use super::Resource;

impl Resource for Role {
    type Create = CreateRole;
    type Update = UpdateRole;

    const PATH: &'static str = "/roles";
}
