//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the server and forwarder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Presence of the upstream credential is checked per request by the
//!   forwarder, not at load time

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ProxyConfig;
pub use schema::UpstreamConfig;
