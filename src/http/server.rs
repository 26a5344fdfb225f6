//! HTTP gateway setup.
//!
//! # Responsibilities
//! - Create the Axum router with the demo upstream handler
//! - Wire up middleware (admission, tracing, timeout)
//! - Spawn the reclamation sweeper alongside the listener
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, response::IntoResponse, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::admission::{admission_middleware, AdmissionState, IdentityExtractor};
use crate::lifecycle::Shutdown;
use crate::limiter::registry::LimiterRegistry;
use crate::limiter::sweeper::Sweeper;

/// HTTP server for the rate limiting gateway.
pub struct HttpServer {
    router: Router,
    registry: Arc<LimiterRegistry>,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new server keyed by peer IP address.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_extractor(config, None)
    }

    /// Create a new server with a custom identity extractor.
    pub fn with_extractor(config: GatewayConfig, extractor: Option<IdentityExtractor>) -> Self {
        let registry = Arc::new(LimiterRegistry::new(
            config.rate_limit.requests_per_second,
            config.rate_limit.burst,
        ));

        let mut state = AdmissionState::new(registry.clone());
        if let Some(extractor) = extractor {
            state = state.with_extractor(extractor);
        }

        let router = Self::build_router(&config, Arc::new(state));
        Self {
            router,
            registry,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: Arc<AdmissionState>) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(upstream_handler))
            .route("/", any(upstream_handler));

        // Passthrough mode: no admission layer when rate limiting is off.
        if config.rate_limit.enabled {
            router = router.layer(middleware::from_fn_with_state(state, admission_middleware));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// The reclamation sweeper is spawned with its own shutdown subscription,
    /// so it stops when the registry it sweeps goes away with the server.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rate_limit_enabled = self.config.rate_limit.enabled,
            "HTTP gateway starting"
        );

        if self.config.rate_limit.enabled {
            let sweeper = Sweeper::new(
                self.registry.clone(),
                Duration::from_secs(self.config.rate_limit.sweep_interval_secs),
            );
            let sweeper_shutdown = shutdown.subscribe();
            tokio::spawn(async move {
                sweeper.run(sweeper_shutdown).await;
            });
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let mut signal = shutdown.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = signal.recv().await;
            })
            .await?;

        tracing::info!("HTTP gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Registry handle, exposed for diagnostics and tests.
    pub fn registry(&self) -> Arc<LimiterRegistry> {
        self.registry.clone()
    }
}

/// Placeholder downstream handler standing in for the protected application.
async fn upstream_handler() -> impl IntoResponse {
    "ok"
}
