//! Upstream forwarding.
//!
//! # Responsibilities
//! - Resolve the target URL from the configured base and the inbound path
//! - Buffer the inbound body and compute its content digest
//! - Obtain the authorization header from the signer
//! - Issue the upstream call and relay the response back
//!
//! # Design Decisions
//! - The digest, content type, and timestamp are computed once and shared
//!   between the signature and the outbound headers; they cannot diverge
//! - The upstream response body is streamed through, never fully buffered
//! - Any failure before transmission aborts with no network call issued

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Request, Response, Uri};
use chrono::Utc;
use url::Url;

use crate::config::ProxyConfig;
use crate::error::RelayError;
use crate::signing::{self, Credential, SigningContext};

/// Method used for every upstream call. The monitoring API authenticates
/// POST requests only; the inbound verb is not forwarded.
pub const UPSTREAM_METHOD: &str = "POST";

/// Content type assumed when a request or response declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Digest header paired with the signature by the upstream scheme.
const CONTENT_MD5: &str = "content-md5";

/// Forwards inbound requests to the upstream API, signed.
pub struct Forwarder {
    config: Arc<ProxyConfig>,
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder, building the shared upstream client.
    pub fn new(config: Arc<ProxyConfig>) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs));

        if config.upstream.danger_accept_invalid_certs {
            tracing::warn!("Upstream TLS certificate verification is DISABLED");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(RelayError::Client)?;
        Ok(Self { config, client })
    }

    /// Relay one inbound request upstream and return the response to send
    /// back to the caller.
    pub async fn relay(&self, request: Request<Body>) -> Result<Response<Body>, RelayError> {
        let target = self.resolve_target(request.uri())?;

        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();

        let body = to_bytes(body, self.config.security.max_body_size)
            .await
            .map_err(RelayError::BodyRead)?;

        let content_md5 = signing::content_md5(&body);
        let date = signing::http_date(Utc::now());
        let path_and_query = signed_path(&target);

        let context = SigningContext {
            method: UPSTREAM_METHOD,
            content_md5: &content_md5,
            content_type: &content_type,
            date: &date,
            path_and_query: &path_and_query,
        };
        let credential = Credential {
            app_id: &self.config.upstream.app_id,
            app_secret: &self.config.upstream.app_secret,
        };
        let authorization = signing::authorization_header(&context, &credential)?;

        tracing::debug!(
            target = %target,
            inbound_method = %parts.method,
            content_md5 = %content_md5,
            "Forwarding signed request"
        );

        let upstream = self
            .client
            .post(target)
            .header(header::DATE, date.as_str())
            .header(header::AUTHORIZATION, authorization.as_str())
            .header(header::CONTENT_TYPE, content_type.as_str())
            .header(CONTENT_MD5, content_md5.as_str())
            .body(body)
            .send()
            .await
            .map_err(RelayError::Upstream)?;

        Ok(relay_response(upstream))
    }

    /// Combine the configured base URL with the inbound path and query.
    ///
    /// An absolute-path join replaces any path on the base URL, so the
    /// inbound path is used verbatim as the upstream path.
    fn resolve_target(&self, uri: &Uri) -> Result<Url, RelayError> {
        let base_url = &self.config.upstream.base_url;
        if base_url.is_empty() {
            return Err(RelayError::MissingBaseUrl);
        }

        let base = Url::parse(base_url)?;
        let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
        Ok(base.join(path_and_query)?)
    }
}

/// Path plus query of the resolved target, as signed.
fn signed_path(target: &Url) -> String {
    match target.query() {
        Some(query) => format!("{}?{}", target.path(), query),
        None => target.path().to_owned(),
    }
}

/// Build the caller-facing response: upstream status, upstream content type
/// (defaulting when absent), body streamed through unmodified.
fn relay_response(upstream: reqwest::Response) -> Response<Body> {
    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    response
}
