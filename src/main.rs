//! Cards API (v1)
//!
//! An HTTP/JSON service over two in-memory collections: cards, and lists
//! that reference cards by id. Built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                      CARDS API                        │
//!                 │                                                      │
//!   Request       │  ┌──────────┐   ┌──────────┐   ┌──────────────────┐  │
//!   ──────────────┼─▶│ pipeline │──▶│  bearer  │──▶│     handlers     │  │
//!                 │  │ id/log/  │   │   auth   │   │  cards / lists   │  │
//!                 │  │ headers/ │   └──────────┘   └────────┬─────────┘  │
//!                 │  │ cors     │                           │            │
//!                 │  └──────────┘                           ▼            │
//!                 │                                ┌──────────────────┐  │
//!   Response      │  ┌──────────┐                  │      store       │  │
//!   ◀─────────────┼──│  error   │◀─────────────────│ validation + R/W │  │
//!                 │  │ handler  │                  │      lock        │  │
//!                 │  └──────────┘                  └──────────────────┘  │
//!                 │                                                      │
//!                 │  config · observability · lifecycle                  │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use cards_api::config;
use cards_api::observability::{logging, metrics};
use cards_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cards-api")]
#[command(about = "HTTP API for cards and lists", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "CARDS_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    logging::init_logging(&config.observability)?;

    tracing::info!("cards-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        environment = ?config.observability.environment,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
