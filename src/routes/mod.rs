//! Route groups and the dispatch table.
//!
//! # Responsibilities
//! - Define `RouteGroup`, a named router mounted under a URL prefix
//! - Record registered groups in order and refuse conflicting registrations
//! - Flatten the registry into a single router for serving
//!
//! # Design Decisions
//! - Groups are built without the application instance; state is attached last
//! - Duplicate names and overlapping prefixes are errors, never silent merges
//! - Registration order is preserved for inspection; matching does not depend on it

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;

use std::fmt;

use axum::Router;
use serde::Serialize;
use thiserror::Error;

use crate::http::health::HEALTH_PATH;

/// Paths served by the application itself, as `(name, prefix)`.
const RESERVED: &[(&str, &str)] = &[("health", HEALTH_PATH)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("route group '{0}' is already registered")]
    DuplicateGroup(String),

    #[error("route group '{group}' prefix '{prefix}' overlaps '{existing}' ({existing_prefix})")]
    PrefixConflict {
        group: String,
        prefix: String,
        existing: String,
        existing_prefix: String,
    },

    #[error("route group '{group}' has invalid prefix '{prefix}'")]
    InvalidPrefix { group: String, prefix: String },
}

/// A named collection of handlers mounted under one URL prefix.
pub struct RouteGroup<S = crate::app::AppState> {
    name: String,
    prefix: String,
    router: Router<S>,
}

impl<S> RouteGroup<S> {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, router: Router<S>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            router,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn info(&self) -> GroupInfo {
        GroupInfo {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

impl<S> fmt::Debug for RouteGroup<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// A dispatch table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    pub name: String,
    pub prefix: String,
}

/// Ordered set of registered route groups.
pub struct RouteRegistry<S = crate::app::AppState> {
    groups: Vec<RouteGroup<S>>,
}

impl<S> Default for RouteRegistry<S> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<S> fmt::Debug for RouteRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.groups.iter()).finish()
    }
}

impl<S> RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group to the dispatch table.
    pub fn register(&mut self, group: RouteGroup<S>) -> Result<(), RegistryError> {
        if !is_valid_prefix(&group.prefix) {
            return Err(RegistryError::InvalidPrefix {
                group: group.name,
                prefix: group.prefix,
            });
        }

        if let Some((name, prefix)) = RESERVED
            .iter()
            .find(|(_, prefix)| prefixes_overlap(prefix, &group.prefix))
        {
            return Err(RegistryError::PrefixConflict {
                group: group.name,
                prefix: group.prefix,
                existing: (*name).to_string(),
                existing_prefix: (*prefix).to_string(),
            });
        }

        for existing in &self.groups {
            if existing.name == group.name {
                return Err(RegistryError::DuplicateGroup(group.name));
            }
            if prefixes_overlap(&existing.prefix, &group.prefix) {
                return Err(RegistryError::PrefixConflict {
                    group: group.name,
                    prefix: group.prefix,
                    existing: existing.name.clone(),
                    existing_prefix: existing.prefix.clone(),
                });
            }
        }

        tracing::debug!(group = %group.name, prefix = %group.prefix, "Route group registered");
        self.groups.push(group);
        Ok(())
    }

    /// Registered groups, in registration order.
    pub fn groups(&self) -> Vec<GroupInfo> {
        self.groups.iter().map(RouteGroup::info).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Mount every group under its prefix.
    pub fn into_router(self) -> Router<S> {
        self.groups
            .into_iter()
            .fold(Router::new(), |router, group| router.nest(&group.prefix, group.router))
    }
}

/// The storefront's groups, in registration order.
pub fn storefront_groups() -> Vec<RouteGroup> {
    vec![
        order::group(),
        checkout::group(),
        cart::group(),
        product::group(),
        auth::group(),
    ]
}

/// Body served at the root of each group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDescriptor {
    pub group: &'static str,
    pub prefix: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl GroupDescriptor {
    pub fn new(group: &'static str, prefix: &'static str) -> Self {
        Self {
            group,
            prefix,
            subject: None,
        }
    }

    pub fn for_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Literal segments only: no captures, wildcards or empty segments.
fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains(['{', '}', '*'])
        && prefix
            .split('/')
            .skip(1)
            .all(|segment| !segment.is_empty() && !segment.starts_with(':'))
}

/// True when one prefix equals the other or contains it as a path segment.
fn prefixes_overlap(a: &str, b: &str) -> bool {
    fn under(path: &str, prefix: &str) -> bool {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
    under(a, b) || under(b, a)
}
