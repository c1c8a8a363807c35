//! Startup orchestration.
//!
//! # Responsibilities
//! - Decide which configuration source to use
//! - Apply environment overrides and validate before anything is built
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - An explicit `--config` path must exist; the default file is optional

use std::fs;
use std::path::Path;

use crate::config::loader::{apply_overrides, parse_config};
use crate::config::{validate_config, AppConfig, ConfigError};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

/// Resolve the process configuration from the CLI path, the default file,
/// or the built-in development settings, in that order.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    resolve_config_with(explicit, Path::new(DEFAULT_CONFIG_FILE), |key| {
        std::env::var(key).ok()
    })
}

pub fn resolve_config_with<F>(
    explicit: Option<&Path>,
    fallback: &Path,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = match explicit {
        Some(path) => Some(path),
        None if fallback.is_file() => Some(fallback),
        None => None,
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(path)?;
            parse_config(&content, lookup)
        }
        None => {
            let mut config = AppConfig::default();
            apply_overrides(&mut config, lookup);
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}
