//! Error taxonomy for the relay.
//!
//! Three categories with distinct surfaces:
//! - Configuration errors (missing base URL / app id / secret) indicate
//!   misconfiguration, not caller fault, and map to 500. They are raised
//!   before any upstream network activity.
//! - Inbound body failures map to 400.
//! - Upstream transport failures (connect, timeout, TLS, DNS) map to 502.
//!   No retries are performed.
//!
//! Non-2xx statuses *from* the upstream API are not errors: the forwarder
//! relays them transparently.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while relaying a request upstream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The upstream base URL is not configured.
    #[error("upstream base URL is not configured")]
    MissingBaseUrl,

    /// The application id is not configured.
    #[error("upstream application id is not configured")]
    MissingAppId,

    /// The application secret is not configured.
    #[error("upstream application secret is not configured")]
    MissingAppSecret,

    /// The configured base URL failed to parse.
    #[error("upstream base URL is invalid: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The upstream HTTP client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The inbound request body could not be read or exceeded the size limit.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The upstream call failed at the transport level.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}

impl RelayError {
    /// HTTP status the caller receives for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingBaseUrl
            | RelayError::MissingAppId
            | RelayError::MissingAppSecret
            | RelayError::InvalidBaseUrl(_)
            | RelayError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::BodyRead(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_map_to_server_error() {
        assert_eq!(
            RelayError::MissingBaseUrl.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::MissingAppId.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::MissingAppSecret.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_base_url_maps_to_server_error() {
        let err = RelayError::from("not a url".parse::<url::Url>().unwrap_err());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
