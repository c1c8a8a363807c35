//! HTTP surface of the application.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, graceful shutdown)
//!     → cors.rs (preflight / allow-origin)
//!     → request ID, tracing, timeout layers
//!     → dispatch table (route groups) or health.rs
//! ```

pub mod cors;
pub mod health;
pub mod server;

pub use cors::CorsPolicy;
pub use server::HttpServer;
