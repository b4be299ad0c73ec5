//! DVB client configuration

use serde::{Deserialize, Serialize};

/// Production endpoint of the DVB/VVO web API
pub const DEFAULT_BASE_URL: &str = "https://webapi.vvo-online.de";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the DVB API client
///
/// Every field has a default, so an empty TOML table or JSON object
/// deserializes into a usable configuration. Empty or zero values are
/// replaced with the defaults when the client is built, see
/// [`DvbConfig::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DvbConfig {
    /// Base URL for the DVB API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("dvb-rs-client/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DvbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DvbConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Create a configuration pointing at a different base URL
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Replace empty or zero values with their defaults
    ///
    /// The base URL is not parsed here; a malformed URL surfaces as a
    /// transport error on the first request.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = default_base_url();
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        self
    }
}
