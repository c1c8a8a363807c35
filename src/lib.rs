//! Storefront API library.
//!
//! Assembles the storefront backend: configuration, cross-origin policy,
//! token manager, database layer and the five route groups.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;

pub use app::{AppState, Application, AssembleError};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
