//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0)
//! - Check that cross-origin rules name real origins, methods and headers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before any extension or route group is attached to the application

use std::net::SocketAddr;

use axum::http::{HeaderName, Method};
use thiserror::Error;
use url::Url;

use crate::config::schema::{AppConfig, CorsResourceConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("auth.jwt_secret must not be empty")]
    EmptyJwtSecret,

    #[error("auth.access_token_ttl_secs must be greater than zero")]
    ZeroTokenTtl,

    #[error("database.url must not be empty")]
    EmptyDatabaseUrl,

    #[error("database.max_connections must be greater than zero")]
    ZeroPoolSize,

    #[error("database.acquire_timeout_secs must be greater than zero")]
    ZeroAcquireTimeout,

    #[error("server.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("cors resource path '{0}' must start with '/'")]
    InvalidCorsPath(String),

    #[error("cors resource '{path}' has no allowed origins")]
    NoCorsOrigins { path: String },

    #[error("cors origin '{0}' is not an http(s) origin")]
    InvalidCorsOrigin(String),

    #[error("cors method '{0}' is not a valid HTTP method")]
    InvalidCorsMethod(String),

    #[error("cors header '{0}' is not a valid header name")]
    InvalidCorsHeader(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.database.url.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseUrl);
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }
    if config.database.acquire_timeout_secs == 0 {
        errors.push(ValidationError::ZeroAcquireTimeout);
    }

    if config.auth.jwt_secret.is_empty() {
        errors.push(ValidationError::EmptyJwtSecret);
    }
    if config.auth.access_token_ttl_secs == 0 {
        errors.push(ValidationError::ZeroTokenTtl);
    }

    for resource in &config.cors.resources {
        validate_cors_resource(resource, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_cors_resource(resource: &CorsResourceConfig, errors: &mut Vec<ValidationError>) {
    if !resource.path.starts_with('/') {
        errors.push(ValidationError::InvalidCorsPath(resource.path.clone()));
    }
    if resource.origins.is_empty() {
        errors.push(ValidationError::NoCorsOrigins {
            path: resource.path.clone(),
        });
    }
    for origin in &resource.origins {
        if !is_origin(origin) {
            errors.push(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }
    for method in &resource.methods {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidCorsMethod(method.clone()));
        }
    }
    for header in &resource.allow_headers {
        if HeaderName::from_bytes(header.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidCorsHeader(header.clone()));
        }
    }
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An origin is `scheme://host[:port]` with nothing after the authority.
pub(crate) fn is_origin(candidate: &str) -> bool {
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
        && url.path() == "/"
        && !candidate.ends_with('/')
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = String::new();
        config.database.url = "  ".into();
        config.database.max_connections = 0;
        config.server.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyJwtSecret));
        assert!(errors.contains(&ValidationError::EmptyDatabaseUrl));
        assert!(errors.contains(&ValidationError::ZeroPoolSize));
        assert!(errors.contains(&ValidationError::InvalidBindAddress("localhost".into())));
    }

    #[test]
    fn test_rejects_bad_cors_entries() {
        let mut config = AppConfig::default();
        let resource = &mut config.cors.resources[0];
        resource.path = "api/*".into();
        resource.origins.push("localhost:5173".into());
        resource.methods.push("GET POST".into());
        resource.allow_headers.push("Bad Header".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidCorsPath("api/*".into()),
                ValidationError::InvalidCorsOrigin("localhost:5173".into()),
                ValidationError::InvalidCorsMethod("GET POST".into()),
                ValidationError::InvalidCorsHeader("Bad Header".into()),
            ]
        );
    }

    #[test]
    fn test_origin_shape() {
        assert!(is_origin("http://localhost:5173"));
        assert!(is_origin("https://shop.example.com"));
        assert!(!is_origin("http://localhost:5173/"));
        assert!(!is_origin("http://localhost:5173/app"));
        assert!(!is_origin("ftp://files.example.com"));
        assert!(!is_origin("*"));
    }
}
