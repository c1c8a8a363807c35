//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per request, tagged with x-request-id
//!
//! Consumers:
//!     → logging.rs (stdout, human-readable or JSON lines)
//! ```

pub mod logging;
