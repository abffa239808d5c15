//! Hierarchical configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Server port is 0.
    #[error("Invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    /// Upstream base URL is blank.
    #[error("Upstream base_url cannot be empty")]
    EmptyBaseUrl,

    /// Upstream timeout is 0.
    #[error("Invalid upstream timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),

    /// Default search radius is 0.
    #[error("Invalid default radius: {0}. Must be at least 1 metre")]
    InvalidRadius(u32),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// CLI state file path is blank.
    #[error("Session state_path cannot be empty")]
    EmptyStatePath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .daytrip/config.yaml (project config)
    /// 3. .daytrip/local.yaml (local overrides, optional)
    /// 4. Environment variables (DAYTRIP_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".daytrip/config.yaml"))
            .merge(Yaml::file(".daytrip/local.yaml"))
            .merge(Env::prefixed("DAYTRIP_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still take precedence over the file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DAYTRIP_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Budget ratios are checked while deserializing and cannot reach this
    /// point unless they sum to 10 000 basis points.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        if config.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.upstream.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.upstream.timeout_secs));
        }

        if config.upstream.default_radius_m == 0 {
            return Err(ConfigError::InvalidRadius(config.upstream.default_radius_m));
        }

        if config.session.state_path.is_empty() {
            return Err(ConfigError::EmptyStatePath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
