//! Access token issuing and validation.
//!
//! # Responsibilities
//! - Sign access tokens (HS256) for a subject and role
//! - Validate signature, expiry and (optionally) issuer
//!
//! # Design Decisions
//! - One manager per application instance, bound at assembly time
//! - Keys are derived once; the manager is cheap to clone (Arc)

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token manager requires a non-empty secret")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Account role carried in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "Customer"),
            Role::Seller => write!(f, "Seller"),
        }
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account identity, e.g. email).
    pub sub: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Unique token ID.
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Issues and validates access tokens for one application instance.
#[derive(Clone)]
pub struct TokenManager {
    keys: Arc<Keys>,
    ttl: Duration,
    issuer: Option<String>,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Bind a token manager from configuration.
    pub fn init_app(config: &AuthConfig) -> Result<Self, TokenError> {
        if config.jwt_secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        let ttl_secs = i64::try_from(config.access_token_ttl_secs).unwrap_or(i64::MAX);

        Ok(Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
            issuer: config.issuer.clone(),
        })
    }

    /// Issue a fresh access token.
    pub fn issue(&self, subject: impl Into<String>, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.into(),
            role,
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims with this manager's key.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(TokenError::Encode)
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    TokenError::Expired
                } else {
                    TokenError::Invalid(e)
                }
            })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(secret: &str) -> TokenManager {
        TokenManager::init_app(&AuthConfig {
            jwt_secret: secret.into(),
            ..AuthConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_issue_then_validate() {
        let tokens = manager("s3cret");
        let token = tokens.issue("ada@example.com", Role::Customer).unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "ada@example.com");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(claims.iss.is_none());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = manager("one").issue("ada@example.com", Role::Seller).unwrap();
        assert!(matches!(
            manager("two").validate(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = manager("s3cret");
        let now = Utc::now().timestamp();
        let token = tokens
            .sign(&Claims {
                sub: "ada@example.com".into(),
                role: Role::Customer,
                iat: now - 7200,
                exp: now - 3600,
                jti: "old".into(),
                iss: None,
            })
            .unwrap();
        assert!(matches!(tokens.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_issuer_enforced_when_configured() {
        let strict = TokenManager::init_app(&AuthConfig {
            jwt_secret: "s3cret".into(),
            issuer: Some("storefront".into()),
            ..AuthConfig::default()
        })
        .unwrap();

        let own = strict.issue("ada@example.com", Role::Customer).unwrap();
        assert_eq!(strict.validate(&own).unwrap().iss.as_deref(), Some("storefront"));

        let unscoped = manager("s3cret").issue("ada@example.com", Role::Customer).unwrap();
        assert!(strict.validate(&unscoped).is_err());
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(matches!(
            TokenManager::init_app(&AuthConfig {
                jwt_secret: String::new(),
                ..AuthConfig::default()
            }),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            manager("s3cret").validate("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
    }
}
