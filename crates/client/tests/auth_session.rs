//! Login, session restore and logout against the fake API.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::{FakeApi, ADMIN_EMAIL, PASSWORD, STAFF_EMAIL, STAFF_MUSEUM_ID};
use museum_client::auth::AuthError;
use museum_client::storage::{TOKEN_KEY, USER_KEY};
use museum_client::{AuthSession, AuthState, FileStorage, MemoryStorage, SessionStorage};

#[tokio::test]
async fn test_login_persists_session() {
    let fake = FakeApi::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let ctx = fake.context_with(storage.clone());

    let user = ctx.session().login(ADMIN_EMAIL, PASSWORD).await.expect("login");
    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role, "Admin");
    assert!(user.is_admin());
    assert_eq!(user.museum_id, None);

    let snapshot = ctx.session().snapshot().await;
    assert_eq!(snapshot.state, AuthState::Authenticated);
    assert!(snapshot.expires_at.is_some());
    assert_eq!(storage.get(TOKEN_KEY), snapshot.token);
    assert!(storage.get(USER_KEY).is_some());
}

#[tokio::test]
async fn test_staff_login_carries_museum() {
    let fake = FakeApi::start().await;
    let ctx = fake.context();

    let user = ctx.session().login(STAFF_EMAIL, PASSWORD).await.expect("login");
    assert!(!user.is_admin());
    assert_eq!(user.museum_id.as_deref(), Some(STAFF_MUSEUM_ID));
}

#[tokio::test]
async fn test_bad_password_leaves_session_unauthenticated() {
    let fake = FakeApi::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let ctx = fake.context_with(storage.clone());

    let err = ctx.session().login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert_matches!(&err, AuthError::Api(api) if api.status_code() == 401);
    assert_eq!(err.to_string(), "API error (401): Invalid email or password");
    assert_eq!(ctx.session().state().await, AuthState::Unauthenticated);
    assert_eq!(storage.get(TOKEN_KEY), None);
}

/// A second session over the same storage restores the login.
#[tokio::test]
async fn test_check_auth_restores_from_storage() {
    let fake = FakeApi::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let ctx = fake.context_with(storage.clone());
    ctx.session().login(STAFF_EMAIL, PASSWORD).await.unwrap();

    let restored = AuthSession::new(ctx.api().clone());
    assert_eq!(restored.state().await, AuthState::Unknown);
    assert_eq!(restored.check_auth().await, AuthState::Authenticated);
    assert_eq!(restored.user().await, ctx.session().user().await);
}

#[tokio::test]
async fn test_check_auth_without_token() {
    let fake = FakeApi::start().await;
    let ctx = fake.context();
    assert_eq!(ctx.session().check_auth().await, AuthState::Unauthenticated);
    assert!(ctx.session().user().await.is_none());
}

#[tokio::test]
async fn test_unreadable_token_is_logged_out() {
    let fake = FakeApi::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "garbage").unwrap();
    let ctx = fake.context_with(storage);

    assert_eq!(ctx.session().check_auth().await, AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_logout_clears_storage() {
    let fake = FakeApi::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let ctx = fake.context_with(storage.clone());
    ctx.session().login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    ctx.session().logout().await.expect("logout");
    assert_eq!(ctx.session().state().await, AuthState::Unauthenticated);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
    assert_eq!(ctx.session().check_auth().await, AuthState::Unauthenticated);
}

/// A file-backed session survives a "restart" (a new context).
#[tokio::test]
async fn test_file_storage_survives_restart() {
    let fake = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let storage = Arc::new(FileStorage::open(path.clone()).unwrap());
        let ctx = fake.context_with(storage);
        ctx.session().login(ADMIN_EMAIL, PASSWORD).await.unwrap();
    }

    let storage = Arc::new(FileStorage::open(path.clone()).unwrap());
    let ctx = fake.context_with(storage);
    assert_eq!(ctx.session().check_auth().await, AuthState::Authenticated);
    assert_eq!(ctx.session().user().await.unwrap().email, ADMIN_EMAIL);
}
