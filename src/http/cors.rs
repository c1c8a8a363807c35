//! Cross-origin resource sharing policy.
//!
//! # Responsibilities
//! - Compile configured CORS resources into path-scoped rules
//! - Answer "which origins, methods and headers apply to this path?"
//! - Produce the `tower_http` layer enforcing the rules on live traffic
//!
//! # Design Decisions
//! - First matching rule wins, in configuration order
//! - Origin checks are path-aware; methods and headers are the union of all rules
//! - A disallowed origin gets no `Access-Control-Allow-Origin` header

use std::sync::Arc;

use axum::http::{request::Parts, HeaderName, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

use crate::config::validation::is_origin;
use crate::config::{CorsConfig, CorsResourceConfig};

#[derive(Debug, Error)]
pub enum CorsError {
    #[error("invalid cors path pattern '{0}'")]
    Path(String),

    #[error("invalid cors origin '{0}'")]
    Origin(String),

    #[error("invalid cors method '{0}'")]
    Method(String),

    #[error("invalid cors header '{0}'")]
    Header(String),
}

/// Which request paths a rule covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// `/*`
    Any,
    /// `/prefix/*`: the prefix itself and everything below it.
    Prefix(String),
    /// Any other pattern.
    Exact(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Result<Self, CorsError> {
        if !pattern.starts_with('/') {
            return Err(CorsError::Path(pattern.to_string()));
        }
        if pattern == "/*" {
            return Ok(Self::Any);
        }
        match pattern.strip_suffix("/*") {
            Some(prefix) => Ok(Self::Prefix(prefix.to_string())),
            None => Ok(Self::Exact(pattern.to_string())),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            Self::Exact(exact) => path == exact,
        }
    }
}

/// A compiled cross-origin rule.
#[derive(Debug, Clone)]
pub struct CorsRule {
    pattern: PathPattern,
    origins: Vec<String>,
    methods: Vec<Method>,
    headers: Vec<HeaderName>,
}

impl CorsRule {
    fn compile(resource: &CorsResourceConfig) -> Result<Self, CorsError> {
        let pattern = PathPattern::parse(&resource.path)?;

        let origins = resource
            .origins
            .iter()
            .map(|origin| {
                normalize_origin(origin).ok_or_else(|| CorsError::Origin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let methods = resource
            .methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                    .map_err(|_| CorsError::Method(m.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let headers = resource
            .allow_headers
            .iter()
            .map(|h| HeaderName::from_bytes(h.as_bytes()).map_err(|_| CorsError::Header(h.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pattern,
            origins,
            methods,
            headers,
        })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Allowed origins in the form browsers send: lowercase host, no default port.
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Allowed request headers, normalized to lowercase.
    pub fn headers(&self) -> &[HeaderName] {
        &self.headers
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }
}

fn normalize_origin(origin: &str) -> Option<String> {
    if !is_origin(origin) {
        return None;
    }
    Url::parse(origin)
        .ok()
        .map(|url| url.origin().ascii_serialization())
}

/// The application's cross-origin policy.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    rules: Arc<[CorsRule]>,
}

impl CorsPolicy {
    /// Compile the configured resources.
    pub fn from_config(config: &CorsConfig) -> Result<Self, CorsError> {
        let rules = config
            .resources
            .iter()
            .map(CorsRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules: rules.into() })
    }

    pub fn rules(&self) -> &[CorsRule] {
        &self.rules
    }

    /// The first rule covering `path`, if any.
    pub fn rule_for(&self, path: &str) -> Option<&CorsRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    pub fn allows_origin(&self, path: &str, origin: &str) -> bool {
        self.rule_for(path)
            .is_some_and(|rule| rule.allows_origin(origin))
    }

    /// Build the middleware enforcing this policy.
    pub fn layer(&self) -> CorsLayer {
        let policy = self.clone();
        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, parts: &Parts| {
            origin
                .to_str()
                .is_ok_and(|origin| policy.allows_origin(parts.uri.path(), origin))
        });

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(AllowMethods::list(self.all_methods()))
            .allow_headers(AllowHeaders::list(self.all_headers()))
    }

    fn all_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = Vec::new();
        for method in self.rules.iter().flat_map(|r| r.methods.iter()) {
            if !methods.contains(method) {
                methods.push(method.clone());
            }
        }
        methods
    }

    fn all_headers(&self) -> Vec<HeaderName> {
        let mut headers: Vec<HeaderName> = Vec::new();
        for header in self.rules.iter().flat_map(|r| r.headers.iter()) {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
        headers
    }
}
