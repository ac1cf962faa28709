//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `api.url`.
pub const API_URL_ENV: &str = "PELADA_API_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content)?;
    finish(config, std::env::var(API_URL_ENV).ok())
}

/// Defaults plus environment, for running without a config file.
pub fn load_default() -> Result<ClientConfig, ConfigError> {
    finish(ClientConfig::default(), std::env::var(API_URL_ENV).ok())
}

fn finish(mut config: ClientConfig, api_url: Option<String>) -> Result<ClientConfig, ConfigError> {
    apply_api_url_override(&mut config, api_url);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_api_url_override(config: &mut ClientConfig, api_url: Option<String>) {
    if let Some(url) = api_url {
        tracing::debug!(api_url = %url, "API root overridden from environment");
        config.api.url = Some(url);
    }
}
