//! Configuration loading for the Wayfinder transfer router
//!
//! This crate reads the human-authored inputs the router starts from:
//! - one TOML descriptor per chain (tokens, endpoints, broker and PFM flags),
//! - the IBC channel registry dataset,
//! - service-level settings with environment variable overrides.
//!
//! Loading is tolerant per chain (a bad descriptor is skipped with a warning)
//! but strict overall: an empty chain set is fatal.

mod descriptor;
mod loader;
mod registry;
mod service;
mod validation;

pub use descriptor::*;
pub use loader::*;
pub use registry::*;
pub use service::*;
pub use validation::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    LoadError(String),

    #[error("config validation failed: {0}")]
    ValidationError(String),

    #[error("no usable chain descriptors in {0}")]
    NoChains(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
