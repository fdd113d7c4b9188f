//! Configuration for STOMP sessions.

use crate::protocol::headers::{self, Headers};

/// Default chunking threshold for outbound frames, in bytes.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 12_000;

/// STOMP session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Largest transport message written for one frame (in bytes).
    ///
    /// Encoded frames longer than this are split into several consecutive
    /// transport messages, which the peer must reassemble.
    ///
    /// Default: 12000
    pub max_frame_size: usize,

    /// Verify the broker's TLS certificate.
    ///
    /// Read by transports that terminate TLS; the engine itself does not use
    /// it. Setting this to `false` accepts untrusted certificates.
    ///
    /// Default: true
    pub certificate_check_enabled: bool,

    /// Headers sent verbatim with `CONNECT`.
    ///
    /// Default: empty
    pub connection_headers: Headers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            certificate_check_enabled: true,
            connection_headers: Headers::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outbound chunking threshold. Zero is treated as one.
    #[must_use]
    pub fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size.max(1);
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub const fn with_certificate_check(mut self, enabled: bool) -> Self {
        self.certificate_check_enabled = enabled;
        self
    }

    /// Replace the `CONNECT` headers.
    #[must_use]
    pub fn with_connection_headers(mut self, connection_headers: Headers) -> Self {
        self.connection_headers = connection_headers;
        self
    }

    /// Add or replace one `CONNECT` header.
    #[must_use]
    pub fn with_connection_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.connection_headers.insert(key, value);
        self
    }

    /// Offer protocol versions, e.g. `"1.1,1.2"`.
    #[must_use]
    pub fn with_accept_version(self, versions: impl Into<String>) -> Self {
        self.with_connection_header(headers::ACCEPT_VERSION, versions)
    }

    /// Offer heartbeat intervals in milliseconds (`send,receive`).
    #[must_use]
    pub fn with_heart_beat(self, send_ms: u64, receive_ms: u64) -> Self {
        self.with_connection_header(headers::HEART_BEAT, format!("{send_ms},{receive_ms}"))
    }

    /// Log in with the given credentials instead of anonymously.
    #[must_use]
    pub fn with_credentials(self, login: impl Into<String>, passcode: impl Into<String>) -> Self {
        self.with_connection_header(headers::LOGIN, login)
            .with_connection_header(headers::PASSCODE, passcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_frame_size, 12_000);
        assert!(config.certificate_check_enabled);
        assert!(config.connection_headers.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_max_frame_size(4096)
            .with_certificate_check(false)
            .with_accept_version("1.1,1.2")
            .with_heart_beat(10_000, 10_000);

        assert_eq!(config.max_frame_size, 4096);
        assert!(!config.certificate_check_enabled);
        assert_eq!(config.connection_headers.get("accept-version"), Some("1.1,1.2"));
        assert_eq!(config.connection_headers.get("heart-beat"), Some("10000,10000"));
    }

    #[test]
    fn test_config_zero_frame_size() {
        let config = Config::new().with_max_frame_size(0);
        assert_eq!(config.max_frame_size, 1);
    }

    #[test]
    fn test_config_credentials() {
        let config = Config::new().with_credentials("guest", "secret");
        let keys: Vec<_> = config.connection_headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["login", "passcode"]);
    }

    #[test]
    fn test_config_replace_connection_headers() {
        let config = Config::new()
            .with_accept_version("1.2")
            .with_connection_headers(Headers::from([("host", "broker")]));
        assert_eq!(config.connection_headers.len(), 1);
        assert_eq!(config.connection_headers.get("host"), Some("broker"));
    }
}
