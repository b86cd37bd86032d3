//! Signed, time-bounded credentials.
//!
//! A credential is an HS256 JWT carrying the holder's name and role. The
//! [`TokenIssuer`] and [`TokenVerifier`] are both built from the same
//! [`Secret`], which is loaded once at startup and never rotated.

mod issuer;
mod secret;
mod verifier;

pub use issuer::TokenIssuer;
pub use secret::Secret;
pub use verifier::TokenVerifier;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// How long an issued credential stays valid, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 2 * 60 * 60;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub name: String,
    pub role: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// The subject of a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    username: String,
    role: String,
}

impl UserIdentity {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Result<Self, Error> {
        let username = username.into();
        let role = role.into();

        if username.trim().is_empty() {
            return Err(Error::InvalidIdentity("username must not be empty"));
        }

        if role.trim().is_empty() {
            return Err(Error::InvalidIdentity("role must not be empty"));
        }

        Ok(Self { username, role })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl From<Claims> for UserIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rejects_blank_fields() {
        assert!(matches!(
            UserIdentity::new("", "admin"),
            Err(Error::InvalidIdentity(_))
        ));
        assert!(matches!(
            UserIdentity::new("alice", "  "),
            Err(Error::InvalidIdentity(_))
        ));

        let identity = UserIdentity::new("alice", "admin").unwrap();
        assert_eq!(identity.username(), "alice");
        assert_eq!(identity.role(), "admin");
    }
}
