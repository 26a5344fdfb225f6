//! Admission middleware: per-client rate limiting at the pipeline edge.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::limiter::registry::LimiterRegistry;

/// Derives the rate-limit key from an inbound request.
///
/// Injected so the limiter stays agnostic to how trust in client identity
/// is established (peer address, proxy-resolved header, API key).
pub type IdentityExtractor = Arc<dyn Fn(&Request<Body>, SocketAddr) -> String + Send + Sync>;

/// Shared state for the admission middleware.
///
/// Owns the registry and therefore all limiter state; nothing outside this
/// layer holds bucket references past a single request.
pub struct AdmissionState {
    registry: Arc<LimiterRegistry>,
    extractor: IdentityExtractor,
}

impl AdmissionState {
    /// Admission state keyed by peer IP address.
    pub fn new(registry: Arc<LimiterRegistry>) -> Self {
        Self {
            registry,
            extractor: Arc::new(|_req, addr| addr.ip().to_string()),
        }
    }

    /// Replace the identity extractor.
    pub fn with_extractor(mut self, extractor: IdentityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn registry(&self) -> &Arc<LimiterRegistry> {
        &self.registry
    }
}

/// Middleware function enforcing per-client admission.
///
/// A denied request is a single synchronous decision: the pipeline is
/// short-circuited with 429 and the downstream handler is never invoked.
pub async fn admission_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<AdmissionState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let identity = (state.extractor)(&request, addr);

    if state.registry.resolve(&identity).allow() {
        next.run(request).await
    } else {
        tracing::warn!(client = %identity, "Rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "error": "Rate limit exceeded" })),
        )
            .into_response()
    }
}
