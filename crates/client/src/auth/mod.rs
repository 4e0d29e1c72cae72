//! Authentication: token claim decoding and the portal session.
//!
//! - [`claims`] -- JWT payload decoding into a [`SessionUser`].
//! - [`session`] -- the [`AuthSession`] state machine (login, logout, check).

pub mod claims;
pub mod session;

pub use claims::{decode_token, SessionUser, TokenClaims};
pub use session::{AuthError, AuthSession, AuthSnapshot, AuthState};
