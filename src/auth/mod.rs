//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! AuthConfig (secret, ttl, issuer)
//!     → token.rs (TokenManager bound at assembly)
//!     → extractor.rs (AuthUser pulls the bearer token per request)
//!     → handlers receive validated Claims
//! ```

pub mod extractor;
pub mod token;

pub use extractor::{AuthError, AuthUser};
pub use token::{Claims, Role, TokenError, TokenManager};
