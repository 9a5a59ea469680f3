//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Browser User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Session credentials.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// HTTP client configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct HttpConfig {
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Referer override.
    #[serde(default)]
    pub referer: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Session credential configuration.
///
/// Environment variables take precedence (see `credentials`).
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct CredentialsConfig {
    /// `SESSDATA` cookie value.
    #[serde(default)]
    pub sessdata: Option<String>,
    /// `bili_jct` cookie value.
    #[serde(default)]
    pub bili_jct: Option<String>,
}

impl HttpConfig {
    /// Returns the configured User-Agent or the default browser one.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
