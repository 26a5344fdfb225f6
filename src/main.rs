//! rategate: per-client admission rate limiting gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  RATEGATE                     │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌───────────┐    ┌─────────┐ │
//!   ───────────────────┼─▶│  http   │───▶│ admission │───▶│upstream │ │
//!                      │  │ server  │    │middleware │    │ handler │ │
//!                      │  └─────────┘    └─────┬─────┘    └─────────┘ │
//!                      │                       │                      │
//!                      │                       ▼                      │
//!                      │               ┌──────────────┐               │
//!                      │               │   limiter    │◀── sweeper    │
//!                      │               │   registry   │    (timer)    │
//!                      │               └──────────────┘               │
//!                      │                                               │
//!                      │  config ─ lifecycle ─ observability           │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Each client identity (peer IP by default) gets an independent token
//! bucket. Exceeding it short-circuits the request with 429 before any
//! downstream handling.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use rategate::config::{load_config, GatewayConfig};
use rategate::http::HttpServer;
use rategate::lifecycle::{signals, Shutdown};
use rategate::observability::logging;

#[derive(Parser)]
#[command(name = "rategate")]
#[command(about = "Per-client admission rate limiting gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_enabled = config.rate_limit.enabled,
        requests_per_second = config.rate_limit.requests_per_second,
        burst = config.rate_limit.burst,
        sweep_interval_secs = config.rate_limit.sweep_interval_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
