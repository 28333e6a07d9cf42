// --- File: crates/shield_auth/src/token.rs ---
//! JWT issuing and verification.
//!
//! The signing secret is loaded once from the JWT_SECRET environment
//! variable at startup; handlers and extractors receive the constructed
//! `AuthTokens` by reference.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shield_config::AppConfig;
use std::env;
use thiserror::Error;

const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("JWT_SECRET environment variable is not set")]
    MissingSecret,
    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub role: String,
    /// Expiration timestamp (Unix epoch seconds).
    pub exp: usize,
}

/// Issues and verifies access tokens with a shared secret.
pub struct AuthTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl AuthTokens {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Build from the environment-sourced secret and the configured TTL.
    pub fn from_env(config: &AppConfig) -> Result<Self, TokenError> {
        let secret = env::var("JWT_SECRET").map_err(|_| TokenError::MissingSecret)?;
        let ttl_hours = config
            .auth
            .as_ref()
            .and_then(|auth| auth.token_ttl_hours)
            .unwrap_or(DEFAULT_TTL_HOURS);
        Ok(Self::new(&secret, ttl_hours))
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: &str, role: &str) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_with_same_secret() {
        let tokens = AuthTokens::new("test-secret", 1);
        let token = tokens.issue("user-1", "admin").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn tokens_do_not_verify_with_another_secret() {
        let issuer = AuthTokens::new("secret-a", 1);
        let verifier = AuthTokens::new("secret-b", 1);
        let token = issuer.issue("user-1", "user").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let tokens = AuthTokens::new("test-secret", 1);
        assert!(tokens.verify("not-a-token").is_err());
    }
}
