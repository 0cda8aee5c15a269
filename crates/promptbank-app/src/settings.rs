//! Application settings: the store configuration plus the admin password.
//!
//! The admin password resolves in this order: command-line flag, runtime
//! `PROMPTBANK_ADMIN_PASSWORD`, the same variable at build time, then the
//! built-in default.

use promptbank_client::ClientConfig;
use promptbank_core::defaults;

/// Admin password baked in at build time, if any.
pub const BUILD_ADMIN_PASSWORD: Option<&str> = option_env!("PROMPTBANK_ADMIN_PASSWORD");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub client: ClientConfig,
    pub admin_password: String,
}

impl AppSettings {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_password = lookup("PROMPTBANK_ADMIN_PASSWORD")
            .filter(|v| !v.is_empty())
            .or_else(|| BUILD_ADMIN_PASSWORD.map(str::to_string))
            .unwrap_or_else(|| defaults::ADMIN_PASSWORD.to_string());

        Self {
            client: ClientConfig::from_lookup(&lookup),
            admin_password,
        }
    }

    /// Apply command-line overrides. `mock` wins over `api_url`.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        admin_password: Option<String>,
        mock: bool,
    ) -> Self {
        if mock {
            self.client.api_url = None;
        } else if let Some(url) = api_url {
            self.client = self.client.with_api_url(url);
        }
        if let Some(password) = admin_password {
            self.admin_password = password;
        }
        self
    }
}
