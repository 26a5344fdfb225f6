//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; subscriber initialized once at startup
//! - Admission decisions log the client identity as a structured field

pub mod logging;
