//! Token Codec
//!
//! HS256 session tokens carrying `{id, role, iat, exp}`. The claim names
//! match tokens minted by the previous deployment, so sessions survive a
//! switch-over as long as the secret is kept.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{principal::Principal, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: config.token_ttl,
        }
    }

    /// Sign a token for `principal`, valid for the configured lifetime.
    pub fn issue(&self, principal: &Principal) -> AuthResult<String> {
        self.issue_at(principal, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, principal: &Principal, issued_at: i64) -> AuthResult<String> {
        let claims = Claims {
            id: principal.id,
            role: principal.role.code().to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry.
    ///
    /// Every failure (bad encoding, wrong signature, wrong algorithm,
    /// expired, missing claims) yields `None`.
    pub fn verify(&self, token: &str) -> Option<Principal> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(Principal::new(
                data.claims.id,
                UserRole::from(data.claims.role),
            )),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                None
            }
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::TokenSecret;

    fn codec_with_secret(secret: &[u8]) -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            token_secret: TokenSecret::new(secret.to_vec()),
            ..AuthConfig::default()
        })
    }

    fn codec() -> TokenCodec {
        codec_with_secret(b"test-secret-that-is-at-least-32-bytes!!")
    }

    #[test]
    fn test_issue_then_verify_returns_same_principal() {
        let codec = codec();
        for principal in [
            Principal::new(1, UserRole::Admin),
            Principal::new(42, UserRole::Editor),
            Principal::new(i32::MAX, UserRole::from_code("volunteer")),
        ] {
            let token = codec.issue(&principal).unwrap();
            assert_eq!(codec.verify(&token), Some(principal));
        }
    }

    #[test]
    fn test_expiry_is_24_hours_after_issue() {
        let codec = codec();
        let token = codec.issue_at(&Principal::new(1, UserRole::Admin), 1_700_000_000).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret-that-is-at-least-32-bytes!!"),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.iat, 1_700_000_000);
        assert_eq!(data.claims.exp - data.claims.iat, 86_400);
    }

    #[test]
    fn test_any_single_character_mutation_is_invalid() {
        let codec = codec();
        let token = codec.issue(&Principal::new(5, UserRole::Editor)).unwrap();

        for (i, ch) in token.char_indices() {
            if ch == '.' {
                continue;
            }
            let replacement = if ch == 'A' { 'B' } else { 'A' };
            let mut mutated = token.clone();
            mutated.replace_range(i..i + 1, &replacement.to_string());
            assert_eq!(codec.verify(&mutated), None, "mutation at {i} accepted");
        }
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let codec = codec();
        let two_days_ago = Utc::now().timestamp() - 2 * 86_400;
        let token = codec.issue_at(&Principal::new(1, UserRole::Admin), two_days_ago).unwrap();
        assert_eq!(codec.verify(&token), None);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = codec().issue(&Principal::new(1, UserRole::Admin)).unwrap();
        let other = codec_with_secret(b"a-completely-different-secret-value!!!");
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn test_garbage_is_invalid() {
        let codec = codec();
        assert_eq!(codec.verify(""), None);
        assert_eq!(codec.verify("not-a-token"), None);
        assert_eq!(codec.verify("a.b.c"), None);
    }

    #[test]
    fn test_token_without_exp_is_invalid() {
        #[derive(Serialize)]
        struct NoExp {
            id: i32,
            role: String,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExp {
                id: 1,
                role: "admin".into(),
            },
            &EncodingKey::from_secret(b"test-secret-that-is-at-least-32-bytes!!"),
        )
        .unwrap();
        assert_eq!(codec().verify(&token), None);
    }
}
