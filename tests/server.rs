//! End-to-end: bind, serve, shut down.

use std::time::Duration;

use axum::http::StatusCode;
use storefront_api::{Application, HttpServer, Shutdown};
use tokio::net::TcpListener;

mod common;

#[tokio::test]
async fn test_serves_health_and_closes_database_on_shutdown() {
    let app = Application::assemble(common::test_config()).unwrap();
    let database = app.database().clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = tokio::spawn(async move {
        HttpServer::new(app).run(listener, server_shutdown).await
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status().as_u16(), StatusCode::OK.as_u16());
    assert!(res.headers().contains_key("x-request-id"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"], "up");

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    assert!(database.is_closed());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = Application::assemble(common::test_config()).unwrap();
    let request = axum::http::Request::builder()
        .uri("/api/wishlist")
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, _, _) = common::send(app.router(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
