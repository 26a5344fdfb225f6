//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → admission.rs (per-client rate limit decision)
//!     → downstream handler (continue)  |  429 response (short-circuit)
//! ```

pub mod admission;
pub mod server;

pub use admission::{AdmissionState, IdentityExtractor};
pub use server::HttpServer;
