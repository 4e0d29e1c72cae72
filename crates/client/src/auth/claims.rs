//! JWT claim decoding.
//!
//! The portals never verify signatures (the API does); they only read the
//! payload to learn who is logged in. Claims arrive under short names or
//! the WS-Federation URIs the server's identity stack emits, so each field
//! is looked up under a list of candidate keys.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use museum_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::session::AuthError;

const ID_CLAIMS: &[&str] = &[
    "Id",
    "id",
    "userId",
    "nameid",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
    "sub",
];

const EMAIL_CLAIMS: &[&str] = &[
    "email",
    "Email",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
    "unique_name",
];

const ROLE_CLAIMS: &[&str] = &[
    "role",
    "Role",
    "roleName",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];

const MUSEUM_CLAIMS: &[&str] = &["MuseumId", "museumId", "museum_id"];

/// Roles that sign in to the admin portal rather than the staff portal.
const ADMIN_ROLES: &[&str] = &["admin", "superadmin", "administrator"];

/// The logged-in user, as persisted under `auth_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: EntityId,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub museum_id: Option<EntityId>,
}

impl SessionUser {
    /// Admin-portal user (as opposed to museum staff).
    pub fn is_admin(&self) -> bool {
        let role = self.role.to_ascii_lowercase();
        ADMIN_ROLES.contains(&role.as_str())
    }
}

/// Everything the portals read out of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user: SessionUser,
    /// The `exp` claim, when present. Informational only.
    pub expires_at: Option<Timestamp>,
}

/// Decode a JWT payload without verifying its signature or expiry.
pub fn decode_token(token: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Map<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)?;
    claims_from_payload(&data.claims)
}

fn claims_from_payload(payload: &Map<String, Value>) -> Result<TokenClaims, AuthError> {
    let id = lookup(payload, ID_CLAIMS).ok_or(AuthError::MissingClaim("user id"))?;
    let email = lookup(payload, EMAIL_CLAIMS).unwrap_or_default();
    let role = lookup(payload, ROLE_CLAIMS).unwrap_or_default();
    let museum_id = lookup(payload, MUSEUM_CLAIMS)
        .filter(|m| !m.eq_ignore_ascii_case("null") && m != "00000000-0000-0000-0000-000000000000");

    let expires_at = payload
        .get("exp")
        .and_then(Value::as_i64)
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0));

    Ok(TokenClaims {
        user: SessionUser {
            id,
            email,
            role,
            museum_id,
        },
        expires_at,
    })
}

/// First non-empty value under any of `keys`. Numbers are stringified and
/// arrays (multi-valued role claims) yield their first element.
fn lookup(payload: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| payload.get(*k))
        .find_map(scalar)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.iter().find_map(scalar),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn sign(payload: Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn short_claim_names() {
        let token = sign(json!({
            "Id": "acc-7",
            "email": "staff@museum.vn",
            "role": "Staff",
            "MuseumId": "m-1",
            "exp": 1_900_000_000
        }));
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user.id, "acc-7");
        assert_eq!(claims.user.email, "staff@museum.vn");
        assert_eq!(claims.user.role, "Staff");
        assert_eq!(claims.user.museum_id.as_deref(), Some("m-1"));
        assert!(!claims.user.is_admin());
        assert_eq!(claims.expires_at.unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn federation_claim_uris_and_numeric_id() {
        let token = sign(json!({
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": 42,
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress": "admin@museum.vn",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": ["Admin", "Staff"]
        }));
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user.id, "42");
        assert_eq!(claims.user.email, "admin@museum.vn");
        assert_eq!(claims.user.role, "Admin");
        assert!(claims.user.is_admin());
        assert!(claims.user.museum_id.is_none());
        assert!(claims.expires_at.is_none());
    }

    #[test]
    fn expired_tokens_still_decode() {
        let token = sign(json!({"sub": "u-1", "exp": 1_000}));
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user.id, "u-1");
    }

    #[test]
    fn missing_id_is_an_error() {
        let token = sign(json!({"email": "a@b.co"}));
        assert!(matches!(
            decode_token(&token),
            Err(AuthError::MissingClaim("user id"))
        ));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            decode_token("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn null_museum_is_none() {
        let token = sign(json!({"Id": "1", "role": "Admin", "MuseumId": "null"}));
        assert!(decode_token(&token).unwrap().user.museum_id.is_none());
    }
}
