//! Account-specific behaviour: optimistic delete, reactivation and museum
//! assignment.

mod common;

use common::FakeApi;
use museum_core::entity::Entity;
use museum_core::models::{Account, CreateAccount};
use museum_core::pagination::ListQuery;
use museum_core::status::EntityStatus;
use serde_json::json;

fn seed_account(fake: &FakeApi) {
    fake.seed(
        "accounts",
        vec![json!({
            "id": "acc-1",
            "email": "curator@museum.test",
            "fullName": "Ada Curator",
            "roleId": 2,
            "status": "Active",
        })],
    );
}

/// The cached account reads `Inactive` right after a successful delete.
#[tokio::test]
async fn test_delete_marks_cached_account_inactive() {
    let fake = FakeApi::start().await;
    seed_account(&fake);
    let ctx = fake.admin_context().await;
    let list = ctx.list::<Account>(ListQuery::default());

    let before = list.get("acc-1").await.unwrap();
    assert_eq!(before.status(), EntityStatus::Active);
    assert_eq!(before.role_id.as_deref(), Some("2"));

    list.delete("acc-1").await.expect("delete");

    let cached = list.cached("acc-1").expect("account stays cached");
    assert_eq!(cached.status(), EntityStatus::Inactive);
    assert!(cached.updated_at.is_some());
    assert_eq!(fake.record("accounts", "acc-1").unwrap()["status"], json!("Inactive"));

    // Inactive is not deleted, so the account is still listed.
    let state = list.state().await;
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].status(), EntityStatus::Inactive);
}

/// A failed delete leaves the cached account untouched.
#[tokio::test]
async fn test_failed_delete_keeps_cached_status() {
    let fake = FakeApi::start().await;
    seed_account(&fake);
    let ctx = fake.admin_context().await;
    let list = ctx.list::<Account>(ListQuery::default());

    list.get("acc-1").await.unwrap();
    fake.revoke_tokens();

    let err = list.delete("acc-1").await.unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert_eq!(list.cached("acc-1").unwrap().status(), EntityStatus::Active);
}

#[tokio::test]
async fn test_activate_uses_account_endpoint() {
    let fake = FakeApi::start().await;
    seed_account(&fake);
    let ctx = fake.admin_context().await;
    let list = ctx.list::<Account>(ListQuery::default());

    list.delete("acc-1").await.unwrap();
    list.activate("acc-1").await.expect("activate");

    assert_eq!(fake.count_requests("PATCH", "/accounts/active/acc-1"), 1);
    assert_eq!(list.get("acc-1").await.unwrap().status(), EntityStatus::Active);
}

#[tokio::test]
async fn test_assign_museum() {
    let fake = FakeApi::start().await;
    seed_account(&fake);
    let ctx = fake.admin_context().await;
    let list = ctx.list::<Account>(ListQuery::default());

    list.get("acc-1").await.unwrap();
    list.assign_museum("acc-1", "m-9").await.expect("assign museum");

    assert_eq!(fake.record("accounts", "acc-1").unwrap()["museumId"], json!("m-9"));
    // The cached detail was dropped, so this reads the new assignment.
    let account = list.get("acc-1").await.unwrap();
    assert_eq!(account.museum_id.as_deref(), Some("m-9"));
}

/// Account creation sends the password but the server never echoes it.
#[tokio::test]
async fn test_create_account() {
    let fake = FakeApi::start().await;
    let ctx = fake.admin_context().await;

    let input = CreateAccount {
        email: "guide@museum.test".into(),
        full_name: "Tour Guide".into(),
        password: "hunter22".into(),
        role_id: "3".into(),
        museum_id: Some("m-1".into()),
    };
    let account = ctx
        .resource::<Account>()
        .create(&input)
        .await
        .expect("create")
        .expect("echoed account");

    assert_eq!(account.label(), "guide@museum.test");
    assert_eq!(account.status(), EntityStatus::Active);
    assert_eq!(account.museum_id.as_deref(), Some("m-1"));
}

#[tokio::test]
async fn test_short_password_is_rejected_locally() {
    let fake = FakeApi::start().await;
    let ctx = fake.admin_context().await;

    let input = CreateAccount {
        email: "guide@museum.test".into(),
        full_name: "Tour Guide".into(),
        password: "123".into(),
        role_id: "3".into(),
        museum_id: None,
    };
    let err = ctx.resource::<Account>().create(&input).await.unwrap_err();
    assert!(err.field_errors().and_then(|e| e.get("password")).is_some());
    assert_eq!(fake.count_requests("POST", "/accounts"), 0);
}
