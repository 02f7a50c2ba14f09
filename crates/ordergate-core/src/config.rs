//! Client configuration.
//!
//! Resolution order, last wins:
//! 1. Built-in defaults
//! 2. `config.toml` (default location: `<config_dir>/ordergate/config.toml`)
//! 3. Environment variables (`ORDERGATE_GATEWAY_URL`, `ORDERGATE_READ_STATUS`,
//!    `ORDERGATE_RESULT_ORDERING`)
//!
//! Command line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";

pub const ENV_GATEWAY_URL: &str = "ORDERGATE_GATEWAY_URL";
pub const ENV_READ_STATUS: &str = "ORDERGATE_READ_STATUS";
pub const ENV_RESULT_ORDERING: &str = "ORDERGATE_RESULT_ORDERING";

/// How read operations (get one, get all, logs, whoami) treat the HTTP status.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReadStatusPolicy {
    /// Any received body is the payload of a success, whatever the status.
    #[default]
    #[serde(alias = "blind")]
    StatusBlind,
    /// Non-2xx responses become failures, like the write operations.
    #[serde(alias = "checked")]
    StatusChecked,
}

impl FromStr for ReadStatusPolicy {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blind" | "status-blind" => Ok(Self::StatusBlind),
            "checked" | "status-checked" => Ok(Self::StatusChecked),
            other => Err(GatewayError::config(format!(
                "unknown read status policy '{}' (expected 'blind' or 'checked')",
                other
            ))),
        }
    }
}

/// How completed operations overwrite the shared result slots.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResultOrdering {
    /// Every completed operation overwrites the slot, in arrival order.
    #[default]
    Arrival,
    /// Results issued before the one currently shown are discarded.
    LatestIssued,
}

impl FromStr for ResultOrdering {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival" => Ok(Self::Arrival),
            "latest-issued" | "latest" => Ok(Self::LatestIssued),
            other => Err(GatewayError::config(format!(
                "unknown result ordering '{}' (expected 'arrival' or 'latest-issued')",
                other
            ))),
        }
    }
}

/// Settings for talking to the gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default)]
    pub read_status: ReadStatusPolicy,
    #[serde(default)]
    pub result_ordering: ResultOrdering,
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            read_status: ReadStatusPolicy::default(),
            result_ordering: ResultOrdering::default(),
        }
    }
}

impl ClientConfig {
    /// Returns the default config file location, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ordergate").join("config.toml"))
    }

    /// Loads the config file at `path`.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from `path` (or the default location) and applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_GATEWAY_URL) {
            self.gateway_url = url;
        }
        if let Some(policy) = lookup(ENV_READ_STATUS) {
            self.read_status = policy.parse()?;
        }
        if let Some(ordering) = lookup(ENV_RESULT_ORDERING) {
            self.result_ordering = ordering.parse()?;
        }
        self.validate()
    }

    /// Checks that the gateway URL is an absolute http(s) origin.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.gateway_url).map_err(|e| {
            GatewayError::config(format!("invalid gateway url '{}': {}", self.gateway_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::config(format!(
                "gateway url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Joins an API path onto the gateway origin.
    pub fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.gateway_url, path)
    }
}

/// Joins `path` onto `base` with exactly one separating slash.
pub fn join_endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
