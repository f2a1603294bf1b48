//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the gateway settings
//! built from them. The resolver and estimator never read the environment
//! themselves; they receive these values through their constructors.

use std::time::Duration;

/// Fallback backend URL used until the lookup service announces another one.
pub const DEFAULT_FALLBACK_API_URL: &str = "https://32a9-34-125-145-107.ngrok-free.app";

/// Lookup service that announces the current backend URL.
pub const DEFAULT_LOOKUP_URL: &str = "https://script.google.com/macros/s/AKfycbx7mPaqI175tMDXKFjm0ZCllLPRrGf5fr207iXBleVoj80VrpFKcTTcvfWIjfi60Xa2Ww/exec";

/// Default timeout for lookups and health probes (seconds).
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Default timeout for generation requests (seconds).
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 120;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use unagi_gateway::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("UNAGI_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if new_name == old_name {
        return None;
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Gateway settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Backend URL used before the first successful lookup
    pub fallback_api_url: String,
    /// Lookup service URL
    pub lookup_url: String,
    /// Timeout applied to lookups and health probes
    pub probe_timeout: Duration,
    /// Timeout applied to generation requests
    pub generate_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            fallback_api_url: DEFAULT_FALLBACK_API_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Load gateway settings from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: get_env_with_fallback_or("UNAGI_HOST", "HOST", &defaults.host),
            port: get_env_with_fallback_parse("UNAGI_PORT", "PORT", defaults.port),
            fallback_api_url: get_env_with_fallback_or(
                "UNAGI_API_URL",
                "API_URL",
                &defaults.fallback_api_url,
            ),
            lookup_url: get_env_with_fallback_or(
                "UNAGI_LOOKUP_URL",
                "UNAGI_LOOKUP_URL",
                &defaults.lookup_url,
            ),
            probe_timeout: Duration::from_secs(get_env_with_fallback_parse(
                "UNAGI_PROBE_TIMEOUT_SECS",
                "UNAGI_PROBE_TIMEOUT_SECS",
                DEFAULT_PROBE_TIMEOUT_SECS,
            )),
            generate_timeout: Duration::from_secs(get_env_with_fallback_parse(
                "UNAGI_GENERATE_TIMEOUT_SECS",
                "UNAGI_GENERATE_TIMEOUT_SECS",
                DEFAULT_GENERATE_TIMEOUT_SECS,
            )),
        }
    }

    /// Override the bind address and port (CLI arguments take precedence).
    pub fn with_bind(mut self, host: String, port: u16) -> Self {
        self.host = host;
        self.port = port;
        self
    }

    /// `host:port` for the TCP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Status polling interval
///
/// `UNAGI_POLL_INTERVAL_SECS`, 30 seconds when unset.
pub fn get_poll_interval() -> Duration {
    let secs = get_env_with_fallback_parse(
        "UNAGI_POLL_INTERVAL_SECS",
        "UNAGI_POLL_INTERVAL_SECS",
        crate::poller::DEFAULT_POLL_INTERVAL_SECS,
    );
    Duration::from_secs(secs.max(1))
}
