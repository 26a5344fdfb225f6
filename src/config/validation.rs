//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (rates positive, intervals non-zero)
//! - Check the bind address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be at least 1")]
    ZeroRequestTimeout,

    #[error("rate_limit.requests_per_second must be positive and finite (got {0})")]
    InvalidRefillRate(f64),

    #[error("rate_limit.burst must be at least 1")]
    ZeroBurst,

    #[error("rate_limit.sweep_interval_secs must be at least 1")]
    ZeroSweepInterval,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let rate_limit = &config.rate_limit;
    if rate_limit.enabled {
        if !rate_limit.requests_per_second.is_finite() || rate_limit.requests_per_second <= 0.0 {
            errors.push(ValidationError::InvalidRefillRate(
                rate_limit.requests_per_second,
            ));
        }
        if rate_limit.burst == 0 {
            errors.push(ValidationError::ZeroBurst);
        }
        if rate_limit.sweep_interval_secs == 0 {
            errors.push(ValidationError::ZeroSweepInterval);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
