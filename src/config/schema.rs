//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the storefront.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the storefront API.
///
/// `database` and `auth` are required sections when loading from a file;
/// `AppConfig::default()` is the built-in development configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Listener and request handling settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Token manager settings.
    pub auth: AuthConfig,

    /// Cross-origin resource sharing rules.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000").
    pub bind_address: String,

    /// Development mode: verbose logging.
    pub debug: bool,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            debug: true,
            request_timeout_secs: 30,
        }
    }
}

/// Database configuration.
///
/// `url` carries no serde default: a config file without it is rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL (e.g., "sqlite://storefront.db").
    pub url: String,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Time to wait for a pooled connection, in seconds.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

/// Token manager configuration.
///
/// `jwt_secret` carries no serde default: a config file without it is rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,

    /// Access token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub access_token_ttl_secs: u64,

    /// Expected `iss` claim. Unchecked when absent.
    #[serde(default)]
    pub issuer: Option<String>,
}

fn default_token_ttl() -> u64 {
    15 * 60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: development-only secret. Override with STOREFRONT_JWT_SECRET.
            jwt_secret: "dev-secret-change-me".to_string(),
            access_token_ttl_secs: default_token_ttl(),
            issuer: None,
        }
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Rules, checked in order; the first matching path wins.
    pub resources: Vec<CorsResourceConfig>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            resources: vec![CorsResourceConfig::default()],
        }
    }
}

/// A single cross-origin rule scoped to a path pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsResourceConfig {
    /// Path pattern: "/*", "/api/*" or an exact path.
    pub path: String,

    /// Allowed origins (scheme://host[:port]).
    pub origins: Vec<String>,

    /// Allowed methods.
    pub methods: Vec<String>,

    /// Allowed request headers.
    pub allow_headers: Vec<String>,
}

impl Default for CorsResourceConfig {
    fn default() -> Self {
        Self {
            path: "/*".to_string(),
            origins: vec!["http://localhost:5173".to_string()],
            methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .into_iter()
                .map(String::from)
                .collect(),
            allow_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
