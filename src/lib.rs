//! Per-client admission rate limiting gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod limiter;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
