//! Immutable client configuration: the API key and the two hosts.
//!
//! # Design
//! Hosts are stored with exactly one trailing `/` so request paths such as
//! `v1/locations` are appended verbatim and the region lookup (empty path)
//! targets the host root.

use std::fmt;

use thiserror::Error;

/// Primary platform API host.
pub const DEFAULT_BASE_URL: &str = "https://api.turso.tech/";

/// Host answering the closest-region lookup.
pub const DEFAULT_REGION_URL: &str = "https://region.turso.io/";

pub const API_KEY_ENV: &str = "TURSO_API_KEY";
pub const BASE_URL_ENV: &str = "TURSO_API_URL";
pub const REGION_URL_ENV: &str = "TURSO_REGION_URL";

/// Errors raised while assembling a `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TURSO_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    region_url: String,
}

impl ClientConfig {
    /// Configuration for the public platform hosts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region_url: DEFAULT_REGION_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_host(base_url);
        self
    }

    pub fn with_region_url(mut self, region_url: &str) -> Self {
        self.region_url = normalize_host(region_url);
        self
    }

    /// Read the key and optional host overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, over an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            config = config.with_base_url(&url);
        }
        if let Some(url) = lookup(REGION_URL_ENV).filter(|u| !u.is_empty()) {
            config = config.with_region_url(&url);
        }
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn region_url(&self) -> &str {
        &self.region_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("region_url", &self.region_url)
            .finish()
    }
}

fn normalize_host(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}
