//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! storefront.toml (or AppConfig::default())
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to the assembler, then shared via Arc in AppState
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Optional sections have defaults; `database` and `auth` must be present in files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, AuthConfig, CorsConfig, CorsResourceConfig, DatabaseConfig, LoggingConfig,
    ServerConfig,
};
pub use validation::{validate_config, ValidationError};
