use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr};
use log::debug;
use serde::Deserialize;

use crate::metadata::OEMBED_ENDPOINT;
use crate::transcript::DEFAULT_LANGUAGES;

pub const DEFAULT_BIND: &str = "0.0.0.0:3001";
const DEFAULT_CAPTION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub languages: Option<Vec<String>>,
    pub bind: Option<String>,
    pub oembed_endpoint: Option<String>,
    pub metadata_timeout_secs: Option<u64>,
    pub caption_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/ytscript/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Caption language preference, falling back to vi then en
    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(langs) if !langs.is_empty() => langs.clone(),
            _ => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn oembed_endpoint(&self) -> &str {
        self.oembed_endpoint.as_deref().unwrap_or(OEMBED_ENDPOINT)
    }

    pub fn metadata_timeout(&self) -> Duration {
        self.metadata_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(crate::metadata::DEFAULT_TIMEOUT)
    }

    pub fn caption_timeout(&self) -> Duration {
        Duration::from_secs(self.caption_timeout_secs.unwrap_or(DEFAULT_CAPTION_TIMEOUT_SECS))
    }

    /// Resolve the listen address; a `PORT` value replaces the configured port
    pub fn bind_addr(&self, port: Option<&str>) -> Result<SocketAddr> {
        let bind = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        let mut addr: SocketAddr = bind.parse().wrap_err_with(|| format!("invalid bind address: {bind}"))?;
        if let Some(port) = port {
            addr.set_port(port.parse().wrap_err_with(|| format!("invalid PORT: {port}"))?);
        }
        Ok(addr)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytscript")
        .join("config.toml")
}
