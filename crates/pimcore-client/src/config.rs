//! Connection configuration.
//!
//! A [`ConnectionConfig`] is resolved once, when the client is constructed;
//! it never changes afterwards. Environment defaults are read by
//! [`ConnectionConfig::from_env`], not on every call.

use crate::error::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable holding the default server URL.
pub const ENV_SERVER_URL: &str = "PIMCORE_URL";

/// Environment variable holding the default API key.
pub const ENV_API_KEY: &str = "PIMCORE_API_KEY";

fn default_timeout_secs() -> u64 {
    30
}

fn default_message_field() -> String {
    "msg".to_string()
}

/// Connection settings for one backend server.
///
/// The [`Debug`] impl redacts the API key to prevent accidental credential
/// exposure in log output.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base server URL, e.g. `https://pim.example.org`.
    pub server_url: String,

    /// API key appended as a query parameter to every request.
    pub api_key: String,

    /// Request timeout in seconds, applied when the HTTP client is built.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response interpretation settings.
    #[serde(default)]
    pub response: ResponseOptions,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server_url", &self.server_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("response", &self.response)
            .finish()
    }
}

impl ConnectionConfig {
    /// Create a config with explicit server URL and API key.
    pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            response: ResponseOptions::default(),
        }
    }

    /// Read server URL and API key from `PIMCORE_URL` / `PIMCORE_API_KEY`.
    ///
    /// Missing variables yield empty fields. URL building passes them
    /// through untouched; call [`ConnectionConfig::validate`] to reject
    /// them up front instead.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            env::var(ENV_SERVER_URL).unwrap_or_default(),
            env::var(ENV_API_KEY).unwrap_or_default(),
        )
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the response interpretation options.
    #[must_use]
    pub fn with_response(mut self, response: ResponseOptions) -> Self {
        self.response = response;
        self
    }

    /// Check that a server URL is present and parseable and a key is set.
    pub fn validate(&self) -> BridgeResult<()> {
        if self.server_url.is_empty() {
            return Err(BridgeError::Config {
                message: "server_url is required".to_string(),
            });
        }
        url::Url::parse(&self.server_url).map_err(|e| BridgeError::Config {
            message: format!("invalid server_url: {e}"),
        })?;
        if self.api_key.is_empty() {
            return Err(BridgeError::Config {
                message: "api_key is required".to_string(),
            });
        }
        Ok(())
    }
}

/// How response bodies are interpreted when normalizing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseOptions {
    /// Body field carrying the server's human-readable message.
    #[serde(default = "default_message_field")]
    pub message_field: String,

    /// Source of the failure message when the transport itself faults.
    #[serde(default)]
    pub fault_message: FaultMessageSource,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            message_field: default_message_field(),
            fault_message: FaultMessageSource::default(),
        }
    }
}

/// Where a transport-fault message is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FaultMessageSource {
    /// The message field of the error body, when one exists.
    #[default]
    ServerField,
    /// The transport layer's own error text (status line or socket error).
    TransportText,
}
