//! Accounts: museum assignment and reactivation.
//!
//! Accounts are the one resource whose delete is applied optimistically:
//! the cached detail reads `Inactive` as soon as the server accepts the
//! delete.

use museum_core::models::{Account, CreateAccount, UpdateAccount};
use museum_core::status::EntityStatus;

use super::{Resource, ResourceApi, ResourceList};
use crate::error::ApiResult;

impl Resource for Account {
    type Create = CreateAccount;
    type Update = UpdateAccount;

    const PATH: &'static str = "/accounts";

    const OPTIMISTIC_DELETE: Option<EntityStatus> = Some(EntityStatus::Inactive);

    /// Accounts are reactivated through `/accounts/active/{id}`.
    fn activate_endpoint(id: &str) -> String {
        format!("{}/active/{}", Self::PATH, id)
    }
}

impl ResourceApi<Account> {
    /// Attach a staff account to a museum.
    pub async fn assign_museum(&self, account_id: &str, museum_id: &str) -> ApiResult<()> {
        self.transition(&format!(
            "{}/{}/assign-museum/{}",
            Account::PATH,
            account_id,
            museum_id
        ))
        .await
    }
}

impl ResourceList<Account> {
    pub async fn assign_museum(&self, account_id: &str, museum_id: &str) -> ApiResult<()> {
        let result = self.api().assign_museum(account_id, museum_id).await;
        self.after_transition(account_id, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_endpoints() {
        assert_eq!(Account::item_endpoint("a-1"), "/accounts/a-1");
        assert_eq!(Account::activate_endpoint("a-1"), "/accounts/active/a-1");
        assert_eq!(Account::OPTIMISTIC_DELETE, Some(EntityStatus::Inactive));
    }
}
