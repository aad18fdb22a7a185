//! Service-level settings

use crate::{ConfigError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings of the router service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the RPC surface binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding one TOML descriptor per chain
    #[serde(default = "default_chains_dir")]
    pub chains_dir: PathBuf,

    /// Channel registry dataset file (JSON)
    #[serde(default = "default_registry_file")]
    pub registry_file: PathBuf,

    /// Hostnames block explorer URLs may point at
    #[serde(default = "default_explorer_allowlist")]
    pub explorer_allowlist: Vec<String>,

    /// CORS origins; empty list allows any origin
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    /// Per-IP requests per minute; absent disables rate limiting
    #[serde(default)]
    pub rate_limit_per_minute: Option<u32>,

    /// Cap on concurrently served requests; absent disables the cap
    #[serde(default)]
    pub max_concurrent_requests: Option<usize>,

    /// Per-request deadline in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    pub broker: BrokerSettings,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

/// Broker quote-service endpoints and failover tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSettings {
    pub primary_url: String,

    #[serde(default)]
    pub backup_urls: Vec<String>,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay; doubles per attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_health_check_interval_secs")]
    pub health_check_interval_secs: u64,

    /// Overall deadline on each outbound HTTP call
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl ServiceConfig {
    /// Load settings from an optional file overlaid with `WAYFINDER__*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix("WAYFINDER").separator("__"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.is_empty() {
            return Err(ConfigError::ValidationError(
                "listen_addr must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(rpm) = self.rate_limit_per_minute {
            if rpm == 0 {
                return Err(ConfigError::ValidationError(
                    "rate_limit_per_minute must be greater than 0 when set".to_string(),
                ));
            }
        }
        self.broker.validate()
    }
}

impl BrokerSettings {
    pub fn validate(&self) -> Result<()> {
        for url in std::iter::once(&self.primary_url).chain(self.backup_urls.iter()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "broker endpoint {url:?} must start with http:// or https://"
                )));
            }
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "broker.http_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// All endpoints, primary first.
    pub fn endpoints(&self) -> Vec<String> {
        std::iter::once(self.primary_url.clone())
            .chain(self.backup_urls.iter().cloned())
            .collect()
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_chains_dir() -> PathBuf {
    PathBuf::from("config/chains")
}

fn default_registry_file() -> PathBuf {
    PathBuf::from("config/channels.json")
}

fn default_explorer_allowlist() -> Vec<String> {
    vec![
        "mintscan.io".to_string(),
        "www.mintscan.io".to_string(),
        "atomscan.com".to_string(),
    ]
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_health_check_interval_secs() -> u64 {
    30
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            primary_url: String::new(),
            backup_urls: Vec::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            health_check_interval_secs: default_health_check_interval_secs(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            chains_dir: default_chains_dir(),
            registry_file: default_registry_file(),
            explorer_allowlist: default_explorer_allowlist(),
            cors_allowed_origins: Vec::new(),
            rate_limit_per_minute: None,
            max_concurrent_requests: None,
            request_timeout_secs: default_request_timeout_secs(),
            broker: BrokerSettings::default(),
            metrics_enabled: true,
            log_level: default_log_level(),
            log_json: false,
        }
    }
}
