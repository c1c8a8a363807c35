//! Product catalogue group. Public.

use axum::{routing::get, Json, Router};

use super::{GroupDescriptor, RouteGroup};

pub const NAME: &str = "product";
pub const PREFIX: &str = "/api/products";

pub fn group() -> RouteGroup {
    RouteGroup::new(NAME, PREFIX, Router::new().route("/", get(index)))
}

async fn index() -> Json<GroupDescriptor> {
    Json(GroupDescriptor::new(NAME, PREFIX))
}
