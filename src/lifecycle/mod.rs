//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Validate → (caller) assemble → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Close database
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then extensions, then route groups, listener last
//! - Ordered shutdown: stop accept, drain, close the pool

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
