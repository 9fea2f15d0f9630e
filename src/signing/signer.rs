//! Signature computation and authorization header assembly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::RelayError;

type HmacSha1 = Hmac<Sha1>;

/// Authorization scheme expected by the upstream API.
pub const AUTH_SCHEME: &str = "API";

/// The credential pair identifying and keying a signature.
///
/// Borrowed from the process-wide configuration; never mutated.
#[derive(Clone, Copy)]
pub struct Credential<'a> {
    pub app_id: &'a str,
    pub app_secret: &'a str,
}

/// The fixed set of request facts a signature is computed over.
///
/// Every field must be the exact string placed on the outbound request;
/// the caller computes each once and shares it between signing and
/// transmission.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    /// Outbound HTTP method.
    pub method: &'a str,
    /// Base64 MD5 digest of the outbound body.
    pub content_md5: &'a str,
    /// Outbound content type.
    pub content_type: &'a str,
    /// RFC 1123 timestamp, also sent as the `Date` header.
    pub date: &'a str,
    /// Resolved upstream path including the query string.
    pub path_and_query: &'a str,
}

impl SigningContext<'_> {
    /// Build the canonical string to sign: five newline-joined lines,
    /// no trailing newline.
    fn string_to_sign(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}",
            self.method, self.content_md5, self.content_type, self.date, self.path_and_query
        )
    }
}

/// Produce the `Authorization` header value for one outbound call.
///
/// # Errors
///
/// Returns a configuration error if the app id or secret is empty; this
/// aborts the request before any network call is attempted.
pub fn authorization_header(
    context: &SigningContext<'_>,
    credential: &Credential<'_>,
) -> Result<String, RelayError> {
    if credential.app_id.is_empty() {
        return Err(RelayError::MissingAppId);
    }
    if credential.app_secret.is_empty() {
        return Err(RelayError::MissingAppSecret);
    }

    let signature = compute_signature(credential.app_secret, &context.string_to_sign());
    Ok(format!(
        "{AUTH_SCHEME} {}:{}",
        credential.app_id, signature
    ))
}

/// Compute the signature: Base64(HMAC-SHA1(secret, string_to_sign)).
fn compute_signature(secret: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Format a timestamp as an RFC 1123 HTTP-date (e.g.
/// `Fri, 26 Jul 2019 06:00:46 GMT`).
#[must_use]
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
