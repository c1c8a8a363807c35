//! Orders placed by the caller. Requires a bearer token.

use axum::{routing::get, Json, Router};

use super::{GroupDescriptor, RouteGroup};
use crate::auth::AuthUser;

pub const NAME: &str = "order";
pub const PREFIX: &str = "/api/orders";

pub fn group() -> RouteGroup {
    RouteGroup::new(NAME, PREFIX, Router::new().route("/", get(index)))
}

async fn index(AuthUser(claims): AuthUser) -> Json<GroupDescriptor> {
    Json(GroupDescriptor::new(NAME, PREFIX).for_subject(claims.sub))
}
