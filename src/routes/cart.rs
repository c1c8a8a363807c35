//! Shopping cart group. Every route requires a bearer token.

use axum::{routing::get, Json, Router};

use super::{GroupDescriptor, RouteGroup};
use crate::auth::AuthUser;

pub const NAME: &str = "cart";
pub const PREFIX: &str = "/api/cart";

pub fn group() -> RouteGroup {
    RouteGroup::new(NAME, PREFIX, Router::new().route("/", get(index)))
}

async fn index(AuthUser(claims): AuthUser) -> Json<GroupDescriptor> {
    Json(GroupDescriptor::new(NAME, PREFIX).for_subject(claims.sub))
}
