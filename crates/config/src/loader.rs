//! Configuration loader implementation

use crate::schema::{EndpointsConfig, Settings};
use crate::validation::ConfigValidator;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use std::path::Path;
use types::ConfigError;

/// Prefix for settings taken from the environment
pub const ENV_PREFIX: &str = "CHECKHEALTH_";

/// Loads the endpoint file and runtime settings
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the endpoint file.
    ///
    /// The whole file is read into memory; endpoint lists are expected to be
    /// small.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<EndpointsConfig> {
        let config_path = config_path.as_ref();

        if !config_path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(config_path).with_context(|| {
            format!("Failed to read configuration file {}", config_path.display())
        })?;

        Self::load_from_str(&content)
    }

    /// Parse and validate endpoint YAML from a string
    pub fn load_from_str(yaml_content: &str) -> Result<EndpointsConfig> {
        let endpoints = Self::parse(yaml_content)?;
        Self::validate(&endpoints)?;
        Ok(endpoints)
    }

    /// Parse endpoint YAML without validating it
    pub fn parse(yaml_content: &str) -> Result<EndpointsConfig> {
        let endpoints: EndpointsConfig = serde_yaml::from_str(yaml_content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(endpoints)
    }

    /// Load runtime settings: defaults overridden by `CHECKHEALTH_*` variables
    pub fn load_settings() -> Result<Settings> {
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("Failed to load settings from environment")?;

        let report = ConfigValidator::validate_settings(&settings);
        if let Some(issue) = report.errors.first() {
            return Err(ConfigError::ValidationError {
                field: issue.field.clone(),
                message: issue.message.clone(),
            }
            .into());
        }

        Ok(settings)
    }

    /// Reject endpoint lists with validation errors; warnings are left to the caller
    fn validate(endpoints: &EndpointsConfig) -> Result<()> {
        let report = ConfigValidator::validate(endpoints);
        if let Some(issue) = report.errors.first() {
            return Err(ConfigError::ValidationError {
                field: issue.field.clone(),
                message: issue.message.clone(),
            }
            .into());
        }
        Ok(())
    }
}
