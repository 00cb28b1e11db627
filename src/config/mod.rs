//! Configuration management for the SPN2 client
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use spn2::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Submitting to: {}", config.api.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `SPN2__<section>__<key>`
//!
//! Examples:
//! - `SPN2__API__BASE_URL=https://web.archive.org/save`
//!
//! The archive key pair is only ever read from the environment:
//! `SPN2_ACCESS_KEY` / `SPN2_SECRET_KEY`, or `IA_ACCESS_KEY_ID` /
//! `IA_SECRET_ACCESS_KEY` as a fallback.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/spn2.toml`.
//! This can be overridden using the `SPN2_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{ApiConfig, Config, Credentials};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Missing archive credentials: set SPN2_ACCESS_KEY and SPN2_SECRET_KEY")]
    MissingCredentials,
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Secrets are not read from the environment here.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// The archive key pair, if both halves were supplied
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.api.access_key, &self.api.secret_key) {
            (Some(access), Some(secret)) => Ok(Credentials::new(access, secret)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[api]
base_url = "https://archive.example.org/save"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.api.base_url, "https://archive.example.org/save");
        assert_eq!(config.api.fixed_headers.len(), 2);
    }

    #[test]
    fn test_validation_catches_bad_scheme() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[api]
base_url = "ftp://archive.example.org/save"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let mut config = Config::default();
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::MissingCredentials)
        ));

        config.api.access_key = Some("key".to_string());
        assert!(config.credentials().is_err());

        config.api.secret_key = Some("secret".to_string());
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.authorization(), "LOW key:secret");
    }
}
