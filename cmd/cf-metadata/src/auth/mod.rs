use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The parts of the host CLI's config (`$CF_HOME/.cf/config.json`) needed
/// to call the API directly. Logging in stays with the host CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfConfig {
    /// API endpoint, e.g. https://api.example.com
    #[serde(default)]
    pub target: String,

    /// Authorization header value, including the `bearer` prefix
    #[serde(default)]
    pub access_token: String,

    #[serde(rename = "SSLDisabled", default)]
    pub ssl_disabled: bool,
}

impl CfConfig {
    /// Get the config file path, honouring CF_HOME like the host CLI does
    fn config_path() -> Result<PathBuf> {
        let home = match env::var_os("CF_HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::home_dir().context("Could not find home directory")?,
        };
        Ok(home.join(".cf").join("config.json"))
    }

    /// Load the host CLI config
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read host CLI config from {}", path.display()))?;

        let config: CfConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse host CLI config from {}", path.display()))?;

        tracing::debug!(path = %path.display(), target = %config.target, "Loaded host CLI config");

        Ok(config)
    }

    /// Require an API endpoint and a token
    pub fn ensure_logged_in(self) -> Result<Self> {
        if self.target.trim().is_empty() {
            anyhow::bail!("No API endpoint set. Use 'cf api' or 'cf login' first");
        }

        if self.access_token.trim().is_empty() {
            anyhow::bail!("Not logged in. Use 'cf login' first");
        }

        Ok(self)
    }
}
