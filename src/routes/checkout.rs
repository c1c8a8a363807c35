//! Checkout group.
//!
//! Mounted behind bearer authentication: a checkout always belongs to a signed-in customer.

use axum::{routing::get, Json, Router};

use super::{GroupDescriptor, RouteGroup};
use crate::auth::AuthUser;

pub const NAME: &str = "checkout";
pub const PREFIX: &str = "/api/checkout";

pub fn group() -> RouteGroup {
    RouteGroup::new(NAME, PREFIX, Router::new().route("/", get(index)))
}

async fn index(AuthUser(claims): AuthUser) -> Json<GroupDescriptor> {
    Json(GroupDescriptor::new(NAME, PREFIX).for_subject(claims.sub))
}
