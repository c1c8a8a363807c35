//! Storefront API server.
//!
//! # Architecture Overview
//!
//! ```text
//!   storefront.toml ──▶ config ──▶ ┌──────────────────── Application ────────────────────┐
//!                                  │  cors policy   token manager   database (sqlx)      │
//!                                  │                                                      │
//!                                  │  dispatch table:                                     │
//!                                  │    /api/orders  /api/checkout  /api/cart             │
//!                                  │    /api/products  /api/auth     + /health            │
//!                                  └──────────────────────────┬───────────────────────────┘
//!                                                             │
//!   Client ◀────────────── HttpServer (axum) ◀────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use storefront_api::lifecycle::startup::resolve_config;
use storefront_api::observability::logging::init_logging;
use storefront_api::{Application, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "storefront-api")]
#[command(about = "Storefront backend API server", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./storefront.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;
    init_logging(&config.logging, &config.server)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.server.bind_address,
        debug = config.server.debug,
        "storefront-api starting"
    );

    let app = Application::assemble(config).inspect_err(|e| {
        tracing::error!(error = %e, "Application assembly failed");
    })?;

    let listener = TcpListener::bind(&app.config().server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(app).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
