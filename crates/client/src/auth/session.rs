//! The portal auth session.
//!
//! State machine: `Unknown -> (check_auth) -> Authenticated | Unauthenticated`.
//! `login` and `logout` move between the two settled states. There is no
//! token refresh; an expired token is discovered by the next request that
//! comes back 401.
//!
//! The session is an ordinary value constructed by the caller and shares its
//! storage with the [`ApiClient`], so each test or portal instance owns an
//! isolated session.

use std::sync::Arc;

use museum_core::types::Timestamp;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::claims::{decode_token, SessionUser};
use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};

/// Login endpoint.
const LOGIN_ENDPOINT: &str = "/auth/login";

/// Errors from login / session restoration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Access token is missing the {0} claim")]
    MissingClaim(&'static str),

    #[error("Login response did not contain a token")]
    MissingToken,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Could not serialize session user: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// `check_auth` has not run yet.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default)]
pub struct AuthSnapshot {
    pub state: AuthState,
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    pub expires_at: Option<Timestamp>,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct AuthSession {
    api: ApiClient,
    storage: Arc<dyn SessionStorage>,
    inner: RwLock<AuthSnapshot>,
}

impl AuthSession {
    /// Create a session in the `Unknown` state over the client's storage.
    pub fn new(api: ApiClient) -> Self {
        let storage = api.storage();
        Self {
            api,
            storage,
            inner: RwLock::new(AuthSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn state(&self) -> AuthState {
        self.inner.read().await.state
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<SessionUser> {
        self.inner.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    /// `exp` of the current token, for display. Not enforced.
    pub async fn expires_at(&self) -> Option<Timestamp> {
        self.inner.read().await.expires_at
    }

    /// Post credentials, decode the returned token and persist the session.
    ///
    /// On failure the session is left unauthenticated and storage untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        match self.try_login(email, password).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!(email, error = %e, "Login failed");
                self.set_unauthenticated().await;
                Err(e)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let request = ApiRequest::post(LOGIN_ENDPOINT).json(&LoginRequest { email, password })?;
        let response = self.api.send_raw(request).await?;

        let token = extract_token(&response.data).ok_or(AuthError::MissingToken)?;
        let claims = decode_token(&token)?;

        self.storage.set(TOKEN_KEY, &token)?;
        self.storage
            .set(USER_KEY, &serde_json::to_string(&claims.user)?)?;

        *self.inner.write().await = AuthSnapshot {
            state: AuthState::Authenticated,
            user: Some(claims.user.clone()),
            token: Some(token),
            expires_at: claims.expires_at,
        };

        tracing::info!(
            user_id = %claims.user.id,
            role = %claims.user.role,
            "Logged in",
        );
        Ok(claims.user)
    }

    /// Clear stored credentials and become unauthenticated.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let previous = self.inner.read().await.user.as_ref().map(|u| u.id.clone());
        // Flip state first so a storage failure cannot leave a live session.
        self.set_unauthenticated().await;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        tracing::info!(user_id = previous.as_deref().unwrap_or("-"), "Logged out");
        Ok(())
    }

    /// Restore the session from storage.
    ///
    /// Authenticated when a decodable token is stored. The stored user is
    /// preferred; the token's claims fill in when it is missing or unreadable.
    pub async fn check_auth(&self) -> AuthState {
        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            self.set_unauthenticated().await;
            return AuthState::Unauthenticated;
        };

        let claims = match decode_token(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "Stored token is unreadable; treating as logged out");
                self.set_unauthenticated().await;
                return AuthState::Unauthenticated;
            }
        };

        let user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<SessionUser>(&raw).ok())
            .unwrap_or(claims.user);

        *self.inner.write().await = AuthSnapshot {
            state: AuthState::Authenticated,
            user: Some(user),
            token: Some(token),
            expires_at: claims.expires_at,
        };
        AuthState::Authenticated
    }

    async fn set_unauthenticated(&self) {
        *self.inner.write().await = AuthSnapshot {
            state: AuthState::Unauthenticated,
            ..AuthSnapshot::default()
        };
    }
}

/// The login payload is either the token itself or an object holding it,
/// possibly one level down.
fn extract_token(data: &Value) -> Option<String> {
    const KEYS: &[&str] = &["token", "accessToken", "access_token", "jwt"];
    match data {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(obj) => KEYS
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()).map(str::to_string))
            .or_else(|| obj.values().filter(|v| v.is_object()).find_map(extract_token)),
        _ => None,
    }
}
