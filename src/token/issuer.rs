use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use super::{Claims, Secret, TOKEN_LIFETIME_SECS, UserIdentity};
use crate::core::error::Error;

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &Secret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, identity: &UserIdentity) -> Result<String, Error> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &UserIdentity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, Error> {
        let iat = issued_at.timestamp();
        let exp = (issued_at + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp();

        let claims = Claims {
            name: identity.username().to_owned(),
            role: identity.role().to_owned(),
            iat,
            nbf: iat,
            exp,
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use tokio::task::JoinSet;

    use super::*;
    use crate::token::TokenVerifier;

    fn secret() -> Secret {
        Secret::new("a-very-secret-signing-key").unwrap()
    }

    fn decode_segment(segment: &str) -> serde_json::Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn token_has_three_segments() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("alice", "admin").unwrap();

        let token = issuer.issue(&identity).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert!(token.split('.').all(|segment| !segment.is_empty()));
    }

    #[test]
    fn header_declares_hs256() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("alice", "admin").unwrap();

        let token = issuer.issue(&identity).unwrap();
        let header = decode_segment(token.split('.').next().unwrap());

        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");
    }

    #[test]
    fn payload_carries_name_role_and_expiry() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("alice", "admin").unwrap();

        let before = Utc::now().timestamp();
        let token = issuer.issue(&identity).unwrap();
        let after = Utc::now().timestamp();

        let payload = decode_segment(token.split('.').nth(1).unwrap());

        assert_eq!(payload["name"], "alice");
        assert_eq!(payload["role"], "admin");

        let exp = payload["exp"].as_i64().unwrap();
        assert!(exp >= before + 7200 && exp <= after + 7200);
        assert_eq!(exp - payload["iat"].as_i64().unwrap(), 7200);
        assert_eq!(payload["nbf"], payload["iat"]);
    }

    #[test]
    fn issue_at_pins_the_issuance_time() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("bob", "employee").unwrap();
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let token = issuer.issue_at(&identity, issued_at).unwrap();
        let payload = decode_segment(token.split('.').nth(1).unwrap());

        assert_eq!(payload["iat"], 1_700_000_000);
        assert_eq!(payload["exp"], 1_700_007_200);
    }

    #[test]
    fn verifies_with_same_secret_only() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("alice", "admin").unwrap();
        let token = issuer.issue(&identity).unwrap();

        let claims = TokenVerifier::new(&secret()).verify(&token).unwrap();
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.role, "admin");

        let rotated = Secret::new("some-other-key").unwrap();
        assert!(matches!(
            TokenVerifier::new(&rotated).verify(&token),
            Err(Error::InvalidCredential(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(&secret());
        let identity = UserIdentity::new("alice", "admin").unwrap();
        let token = issuer
            .issue_at(&identity, Utc::now() - Duration::hours(3))
            .unwrap();

        assert!(matches!(
            TokenVerifier::new(&secret()).verify(&token),
            Err(Error::ExpiredCredential)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_issuance_yields_distinct_valid_tokens() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());
        let mut tasks = JoinSet::new();

        for i in 0..1000 {
            let issuer = issuer.clone();
            tasks.spawn(async move {
                let identity = UserIdentity::new(format!("user{i}"), "employee").unwrap();
                (i, issuer.issue(&identity).unwrap())
            });
        }

        let mut tokens = HashSet::new();
        while let Some(result) = tasks.join_next().await {
            let (i, token) = result.unwrap();
            let claims = verifier.verify(&token).unwrap();
            assert_eq!(claims.name, format!("user{i}"));
            assert_eq!(claims.role, "employee");
            tokens.insert(token);
        }

        assert_eq!(tokens.len(), 1000);
    }
}
