//! Rate limiting subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → http::admission (extract client identity)
//!     → registry.rs (resolve identity to its bucket)
//!     → bucket.rs (allow/deny decision)
//!
//! Timer:
//!     → sweeper.rs (periodic wholesale sweep of registry state)
//! ```
//!
//! # Design Decisions
//! - One independent bucket per client identity; no global lock serializes
//!   unrelated clients' admission checks
//! - Wholesale periodic sweep bounds memory under rotating identities
//! - Admission is a synchronous, bounded-time decision; denied requests are
//!   rejected immediately, never queued

pub mod bucket;
pub mod registry;
pub mod sweeper;

pub use bucket::TokenBucket;
pub use registry::LimiterRegistry;
pub use sweeper::Sweeper;
