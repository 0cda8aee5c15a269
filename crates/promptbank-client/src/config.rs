//! Client configuration.
//!
//! Values come from environment variables (a `.env` file is loaded by the
//! binary before this runs). The endpoint URL may also be baked in at build
//! time through the `PROMPTBANK_API_URL` compile-time variable; a runtime
//! value of the same name wins.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PROMPTBANK_API_URL` | unset (mock mode) |
//! | `PROMPTBANK_MOCK_DELAY_MS` | 1000 |
//! | `PROMPTBANK_STRICT_MUTATIONS` | true |
//! | `PROMPTBANK_REQUEST_TIMEOUT_SECS` | unset (no timeout) |

use tracing::debug;

use promptbank_core::defaults;
use promptbank_core::{Error, Result};

/// Endpoint baked in at build time, if any.
pub const BUILD_API_URL: Option<&str> = option_env!("PROMPTBANK_API_URL");

/// Configuration for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote endpoint. `None` selects mock mode.
    pub api_url: Option<String>,
    /// Inspect mutation response envelopes for `status: "error"`.
    pub strict_mutations: bool,
    /// Artificial delay before mock mode answers a list call.
    pub mock_delay_ms: u64,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: normalize_url(BUILD_API_URL.map(str::to_string)),
            strict_mutations: defaults::STRICT_MUTATIONS,
            mock_delay_ms: defaults::MOCK_DELAY_MS,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup. Unparseable numbers and
    /// booleans fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let api_url = match lookup("PROMPTBANK_API_URL") {
            // An explicitly empty runtime value forces mock mode.
            Some(v) => normalize_url(Some(v)),
            None => base.api_url,
        };

        let strict_mutations = lookup("PROMPTBANK_STRICT_MUTATIONS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(base.strict_mutations);

        let mock_delay_ms = lookup("PROMPTBANK_MOCK_DELAY_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(base.mock_delay_ms);

        let request_timeout_secs = lookup("PROMPTBANK_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        let config = Self {
            api_url,
            strict_mutations,
            mock_delay_ms,
            request_timeout_secs,
        };
        debug!(?config, "Loaded client config");
        config
    }

    /// Replace the endpoint; an empty string selects mock mode.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = normalize_url(Some(url.into()));
        self
    }

    /// True when no endpoint is configured.
    pub fn is_mock(&self) -> bool {
        self.api_url.is_none()
    }

    /// Reject endpoints that are not http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "PROMPTBANK_API_URL must be an http(s) URL, got {}",
                    url
                )));
            }
        }
        Ok(())
    }
}

fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
