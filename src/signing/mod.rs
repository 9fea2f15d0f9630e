//! Request signing for the Solis Cloud monitoring API.
//!
//! Every upstream call carries an `Authorization` header of the form:
//!
//! ```text
//! API <AppId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(AppSecret, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                PathAndQuery
//! ```
//!
//! `Content-MD5` is the base64 of the MD5 digest of the exact body bytes
//! sent upstream; `Date` is the RFC 1123 timestamp also sent in the `Date`
//! header. The forwarder computes each value once and reuses it for both
//! signing and the outbound request, so the signed facts can never diverge
//! from the transmitted ones.

pub mod digest;
pub mod signer;

pub use digest::content_md5;
pub use signer::{authorization_header, http_date, Credential, SigningContext, AUTH_SCHEME};
