//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so a minimal config loads.

use serde::Deserialize;

/// Root configuration for the signing relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API endpoint and credential.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security limits.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
///
/// The credential pair is read once at startup and never mutated; the
/// forwarder validates presence per request before any network call.
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API (e.g., "https://www.soliscloud.com:13333").
    pub base_url: String,

    /// Application identifier, sent as the key id in the Authorization header.
    pub app_id: String,

    /// Application secret used to key the request signature.
    pub app_secret: String,

    /// Skip upstream TLS certificate verification.
    ///
    /// Only enable for an upstream endpoint with a self-signed certificate;
    /// enabling it is logged as a warning at startup.
    pub danger_accept_invalid_certs: bool,
}

// Manual Debug so the secret never reaches log output.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field(
                "danger_accept_invalid_certs",
                &self.danger_accept_invalid_certs,
            )
            .finish()
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Security limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_loads_with_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.security.max_body_size, 2 * 1024 * 1024);
        assert!(config.upstream.base_url.is_empty());
        assert!(!config.upstream.danger_accept_invalid_certs);
    }

    #[test]
    fn test_full_config_deserializes() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            base_url = "https://www.soliscloud.com:13333"
            app_id = "1300386381676799"
            app_secret = "shhh"
            danger_accept_invalid_certs = true

            [timeouts]
            connect_secs = 2
            request_secs = 10

            [security]
            max_body_size = 65536
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.app_id, "1300386381676799");
        assert!(config.upstream.danger_accept_invalid_certs);
        assert_eq!(config.timeouts.connect_secs, 2);
        assert_eq!(config.security.max_body_size, 65536);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let upstream = UpstreamConfig {
            app_secret: "super-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{upstream:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
