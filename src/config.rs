//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Client configuration, loaded from the environment with sane defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the MandiPlus REST API.
    pub api_base_url: String,
    /// Base URL of the web app; relative document links resolve against it.
    pub web_base_url: String,
    /// Bearer token for authenticated endpoints, if the user is logged in.
    pub auth_token: Option<SecretString>,
    /// Delay before falling back to the home screen when the document link
    /// is not ready at submission time.
    pub fallback_redirect_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            web_base_url: "http://localhost:3000".to_string(),
            auth_token: None,
            fallback_redirect_delay: Duration::from_millis(2000),
        }
    }
}

impl AppConfig {
    /// Build a config from `MANDIPLUS_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            api_base_url: base_url_var("MANDIPLUS_API_BASE_URL", defaults.api_base_url)?,
            web_base_url: base_url_var("MANDIPLUS_WEB_BASE_URL", defaults.web_base_url)?,
            auth_token: std::env::var("MANDIPLUS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            fallback_redirect_delay: defaults.fallback_redirect_delay,
        })
    }
}

/// Read a base-URL variable, normalizing the trailing slash away.
fn base_url_var(key: &str, default: String) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            let value = value.trim_end_matches('/').to_string();
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(value)
            } else {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected an http(s) URL, got {value:?}"),
                })
            }
        }
        Err(_) => Ok(default),
    }
}
