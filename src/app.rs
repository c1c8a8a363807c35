//! Application assembly.
//!
//! # Data Flow
//! ```text
//! AppConfig
//!     → validate_config (all-or-nothing, before anything is attached)
//!     → CorsPolicy::from_config
//!     → TokenManager::init_app
//!     → Database::init_app
//!     → RouteRegistry (order, checkout, cart, product, auth)
//!     → Application (state + policy + dispatch table + router)
//! ```
//!
//! # Design Decisions
//! - Every call builds a fresh, independent instance; nothing is cached globally
//! - The entry point owns the one instance it serves and passes it explicitly
//! - Handlers see the instance only through `AppState` (Arc, read-only)

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::FromRef, routing::get, Router};
use thiserror::Error;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{TokenError, TokenManager};
use crate::config::validation::join_errors;
use crate::config::{validate_config, AppConfig, ValidationError};
use crate::db::{Database, DatabaseError};
use crate::http::cors::{CorsError, CorsPolicy};
use crate::http::health;
use crate::routes::{self, GroupInfo, RegistryError, RouteGroup, RouteRegistry};

/// Why an application could not be assembled.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error("cross-origin policy: {0}")]
    Cors(#[from] CorsError),

    #[error("token manager: {0}")]
    Auth(#[from] TokenError),

    #[error("database: {0}")]
    Database(#[from] DatabaseError),

    #[error("route registration: {0}")]
    Routes(#[from] RegistryError),
}

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppStateInner {
    pub config: AppConfig,
    pub tokens: TokenManager,
    pub database: Database,
}

#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(config: AppConfig, tokens: TokenManager, database: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                tokens,
                database,
            }),
        }
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<AppState> for TokenManager {
    fn from_ref(state: &AppState) -> Self {
        state.inner.tokens.clone()
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.inner.database.clone()
    }
}

/// A fully assembled, servable application.
#[derive(Debug)]
pub struct Application {
    state: AppState,
    cors: CorsPolicy,
    groups: Vec<GroupInfo>,
    router: Router,
}

impl Application {
    /// Assemble the storefront with its five route groups.
    ///
    /// Must be called from within a Tokio runtime (the database pool lives there).
    pub fn assemble(config: AppConfig) -> Result<Self, AssembleError> {
        Self::assemble_with(config, routes::storefront_groups())
    }

    /// Assemble with an explicit set of route groups, registered in iteration order.
    pub fn assemble_with<I>(config: AppConfig, groups: I) -> Result<Self, AssembleError>
    where
        I: IntoIterator<Item = RouteGroup>,
    {
        validate_config(&config).map_err(AssembleError::Config)?;

        let cors = CorsPolicy::from_config(&config.cors)?;
        let tokens = TokenManager::init_app(&config.auth)?;
        let database = Database::init_app(&config.database)?;

        let mut registry = RouteRegistry::new();
        for group in groups {
            registry.register(group)?;
        }
        let groups = registry.groups();

        let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
        let state = AppState::new(config, tokens, database);
        let router = Self::build_router(registry, &cors, request_timeout, state.clone());

        tracing::info!(
            groups = ?groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
            cors_rules = cors.rules().len(),
            "Application assembled"
        );

        Ok(Self {
            state,
            cors,
            groups,
            router,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        registry: RouteRegistry,
        cors: &CorsPolicy,
        request_timeout: Duration,
        state: AppState,
    ) -> Router {
        registry
            .into_router()
            .route(health::HEALTH_PATH, get(health::health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors.layer())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.state.tokens
    }

    pub fn database(&self) -> &Database {
        &self.state.database
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// The dispatch table, in registration order.
    pub fn route_groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    /// A handle to the servable router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
