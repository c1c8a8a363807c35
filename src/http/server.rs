//! HTTP server.
//!
//! # Responsibilities
//! - Serve an assembled application on a bound listener
//! - Stop accepting and drain on shutdown
//! - Close the database pool once serving has ended

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::app::Application;
use crate::lifecycle::shutdown::notified;

/// HTTP server for an assembled application.
#[derive(Debug)]
pub struct HttpServer {
    app: Application,
}

impl HttpServer {
    pub fn new(app: Application) -> Self {
        Self { app }
    }

    /// Run until `shutdown` fires, accepting connections on `listener`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            groups = self.app.route_groups().len(),
            "HTTP server starting"
        );

        let served = axum::serve(listener, self.app.router())
            .with_graceful_shutdown(notified(shutdown))
            .await;

        self.app.database().close().await;
        tracing::info!("HTTP server stopped");
        served
    }

    pub fn app(&self) -> &Application {
        &self.app
    }
}
