//! Assembly of the application instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::{header, Method};
use storefront_api::config::loader::parse_config;
use storefront_api::config::{ConfigError, ValidationError};
use storefront_api::routes::{self, RegistryError, RouteGroup};
use storefront_api::{Application, AssembleError};

mod common;

#[tokio::test]
async fn test_assembles_five_groups_in_order() {
    let app = Application::assemble(common::test_config()).unwrap();

    let groups: Vec<_> = app
        .route_groups()
        .iter()
        .map(|g| (g.name.as_str(), g.prefix.as_str()))
        .collect();
    assert_eq!(
        groups,
        [
            ("order", "/api/orders"),
            ("checkout", "/api/checkout"),
            ("cart", "/api/cart"),
            ("product", "/api/products"),
            ("auth", "/api/auth"),
        ]
    );
}

#[tokio::test]
async fn test_cors_policy_for_any_path() {
    let app = Application::assemble(common::test_config()).unwrap();
    let rule = app.cors().rule_for("/anything").unwrap();

    assert_eq!(rule.origins(), ["http://localhost:5173"]);
    assert_eq!(
        rule.methods(),
        [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS]
    );
    assert_eq!(rule.headers(), [header::CONTENT_TYPE, header::AUTHORIZATION]);
}

#[tokio::test]
async fn test_each_call_builds_an_independent_instance() {
    let first = Application::assemble(common::test_config()).unwrap();

    let mut other_config = common::test_config();
    other_config.auth.jwt_secret = "another-secret".into();
    let second = Application::assemble(other_config).unwrap();

    assert!(!first.state().ptr_eq(second.state()));
    assert!(first.state().ptr_eq(&first.state().clone()));

    // tokens are bound to their own instance
    let token = first
        .tokens()
        .issue("ada@example.com", storefront_api::auth::Role::Customer)
        .unwrap();
    assert!(first.tokens().validate(&token).is_ok());
    assert!(second.tokens().validate(&token).is_err());

    // closing one database leaves the other usable
    first.database().close().await;
    second.database().ping().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_fails_before_any_group_is_registered() {
    let mut config = common::test_config();
    config.auth.jwt_secret = String::new();

    let pulled = Arc::new(AtomicBool::new(false));
    let flag = pulled.clone();
    let groups = std::iter::from_fn(move || {
        flag.store(true, Ordering::SeqCst);
        None::<RouteGroup>
    });

    let err = Application::assemble_with(config, groups).unwrap_err();
    match err {
        AssembleError::Config(errors) => {
            assert_eq!(errors, vec![ValidationError::EmptyJwtSecret]);
        }
        other => panic!("expected config error, got {other}"),
    }
    assert!(!pulled.load(Ordering::SeqCst), "route groups were touched");
}

#[tokio::test]
async fn test_config_file_missing_required_key_is_rejected() {
    let err = parse_config("[database]\nurl = \"sqlite::memory:\"\n", |_| None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[tokio::test]
async fn test_registering_a_group_twice_is_a_conflict() {
    let groups = vec![routes::cart::group(), routes::cart::group()];

    let err = Application::assemble_with(common::test_config(), groups).unwrap_err();
    assert!(matches!(
        err,
        AssembleError::Routes(RegistryError::DuplicateGroup(ref name)) if name == "cart"
    ));
}

#[tokio::test]
async fn test_overlapping_groups_are_a_conflict() {
    let groups = vec![
        routes::cart::group(),
        RouteGroup::new("cart-items", "/api/cart/items", axum::Router::new()),
    ];

    let err = Application::assemble_with(common::test_config(), groups).unwrap_err();
    assert!(matches!(
        err,
        AssembleError::Routes(RegistryError::PrefixConflict { .. })
    ));
}

#[tokio::test]
async fn test_path_parameter_prefix_is_rejected() {
    let groups = vec![RouteGroup::new("item", "/api/:id", axum::Router::new())];

    let err = Application::assemble_with(common::test_config(), groups).unwrap_err();
    assert!(matches!(
        err,
        AssembleError::Routes(RegistryError::InvalidPrefix { ref prefix, .. }) if prefix == "/api/:id"
    ));
}

#[tokio::test]
async fn test_group_cannot_shadow_health_endpoint() {
    for prefix in ["/health", "/health/db"] {
        let router = axum::Router::new().route("/", axum::routing::get(|| async { "ok" }));
        let groups = vec![routes::product::group(), RouteGroup::new("status", prefix, router)];

        let err = Application::assemble_with(common::test_config(), groups).unwrap_err();
        match err {
            AssembleError::Routes(RegistryError::PrefixConflict { existing_prefix, .. }) => {
                assert_eq!(existing_prefix, "/health");
            }
            other => panic!("prefix {prefix:?} not rejected: {other}"),
        }
    }
}
