//! Authentication group.
//!
//! The root is public; `/me` echoes the caller's validated claims.

use axum::{routing::get, Json, Router};

use super::{GroupDescriptor, RouteGroup};
use crate::auth::{AuthUser, Claims};

pub const NAME: &str = "auth";
pub const PREFIX: &str = "/api/auth";

pub fn group() -> RouteGroup {
    RouteGroup::new(
        NAME,
        PREFIX,
        Router::new().route("/", get(index)).route("/me", get(me)),
    )
}

async fn index() -> Json<GroupDescriptor> {
    Json(GroupDescriptor::new(NAME, PREFIX))
}

async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
