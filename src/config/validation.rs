//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check that addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Empty upstream credentials are NOT a load-time error: the forwarder
//!   rejects them per request, so fixture configs stay constructible

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.base_url {url:?} is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("timeouts.connect_secs must be greater than zero")]
    ZeroConnectTimeout,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every semantic error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    // An empty base URL is a request-time configuration error, but a
    // non-empty one that does not parse is a mistake worth failing fast on.
    if !config.upstream.base_url.is_empty() {
        if let Err(e) = Url::parse(&config.upstream.base_url) {
            errors.push(ValidationError::InvalidBaseUrl {
                url: config.upstream.base_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
