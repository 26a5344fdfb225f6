//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use rategate::config::GatewayConfig;
use rategate::http::{HttpServer, IdentityExtractor};
use rategate::lifecycle::Shutdown;

/// Gateway config with the given limiter settings, bound to `addr`.
pub fn gateway_config(addr: SocketAddr, requests_per_second: f64, burst: u32) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = addr.to_string();
    config.rate_limit.requests_per_second = requests_per_second;
    config.rate_limit.burst = burst;
    config
}

/// Start a gateway on `addr`, returning its shutdown handle.
pub async fn start_gateway(
    addr: SocketAddr,
    config: GatewayConfig,
    extractor: Option<IdentityExtractor>,
) -> Shutdown {
    let shutdown = Shutdown::new();
    let server = HttpServer::with_extractor(config, extractor);
    let listener = TcpListener::bind(addr).await.unwrap();
    let run_shutdown = shutdown.clone();

    tokio::spawn(async move {
        let _ = server.run(listener, run_shutdown).await;
    });

    // Give the listener a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// Non-pooled client so each test controls its own connections.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
