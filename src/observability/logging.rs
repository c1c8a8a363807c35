//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Pick the log level from `RUST_LOG`, then config
//!
//! # Design Decisions
//! - Pretty format for development, JSON lines when `logging.json` is set
//! - `server.debug` raises the default level to `debug`

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::{LoggingConfig, ServerConfig};

/// Default filter directives when `RUST_LOG` is unset.
pub fn default_directives(logging: &LoggingConfig, server: &ServerConfig) -> String {
    let level = if server.debug { "debug" } else { logging.level.as_str() };
    format!("storefront_api={level},tower_http={level},sqlx=warn")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(logging: &LoggingConfig, server: &ServerConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(logging, server)));

    let (pretty, json) = if logging.json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()
}
