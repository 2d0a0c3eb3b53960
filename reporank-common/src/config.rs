//! Configuration loading
//!
//! Resolution priority for each overridable value:
//! 1. Environment variable (highest)
//! 2. TOML config file
//! 3. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Environment variable naming the config file location
pub const CONFIG_PATH_ENV: &str = "REPORANK_CONFIG";

/// Top-level service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listen host
    pub host: String,
    /// HTTP listen port (env override: REPORANK_PORT)
    pub port: u16,
    pub github: GithubConfig,
    pub search: SearchConfig,
}

/// Upstream GitHub API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Base URL of the search API (env override: REPORANK_GITHUB_BASE_URL)
    pub base_url: String,
    /// Per-call timeout applied to every upstream request
    pub request_timeout_secs: u64,
}

/// Search orchestration tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pages fetched when the request does not specify max_pages
    pub default_max_pages: u32,
    /// Hard ceiling on pages per request
    pub max_pages_ceiling: u32,
    /// Items requested per page
    pub page_size: u32,
    /// Worker limit for concurrent page fetches
    pub max_concurrent_pages: usize,
    /// Delay between sequential normalization probes
    pub probe_delay_ms: u64,
    /// Total attempts per page before a retryable failure becomes fatal
    pub retry_max_attempts: u32,
    /// Backoff base; the sleep is base * attempt number
    pub retry_base_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            github: GithubConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_pages: 5,
            max_pages_ceiling: 10,
            page_size: 100,
            max_concurrent_pages: 10,
            probe_delay_ms: 50,
            retry_max_attempts: 3,
            retry_base_delay_ms: 400,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides. A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
                let config: ServiceConfig = toml::from_str(&content)
                    .map_err(|e| Error::Config(format!("Cannot parse {}: {}", path.display(), e)))?;
                info!("Configuration loaded from {}", path.display());
                config
            }
            Some(path) => {
                warn!("Config file {} not found, using defaults", path.display());
                ServiceConfig::default()
            }
            None => ServiceConfig::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("REPORANK_PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("REPORANK_PORT is not a port number: {}", port)))?;
        }
        if let Ok(base_url) = std::env::var("REPORANK_GITHUB_BASE_URL") {
            self.github.base_url = base_url;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.search.max_pages_ceiling == 0 {
            return Err(Error::Config("max_pages_ceiling must be at least 1".to_string()));
        }
        if self.search.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.search.max_concurrent_pages == 0 {
            return Err(Error::Config("max_concurrent_pages must be at least 1".to_string()));
        }
        if self.search.retry_max_attempts == 0 {
            return Err(Error::Config("retry_max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}
