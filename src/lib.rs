//! Signing relay for the Solis Cloud monitoring API.
//!
//! Relays inbound HTTP requests to the monitoring API, attaching the
//! per-request HMAC-SHA1 signature its authentication scheme requires, and
//! streams the upstream response back unchanged.
//!
//! # Architecture Overview
//!
//! ```text
//!  Client request ──▶ http::server ──▶ http::forwarder ──▶ upstream API
//!                                           │
//!                                  signing (digest + HMAC)
//!                                           │
//!  Client response ◀── status / content-type / streamed body ◀──┘
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod signing;

pub use config::ProxyConfig;
pub use error::RelayError;
pub use http::HttpServer;
