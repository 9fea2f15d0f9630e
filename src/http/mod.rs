//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → forwarder.rs (buffer body → digest → sign → upstream POST)
//!     → relay response (status + content type + streamed body)
//!     → Send to client
//! ```

pub mod forwarder;
pub mod request;
pub mod server;

pub use forwarder::Forwarder;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
