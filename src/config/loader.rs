//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config/analytics.yaml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "ANALYTICS_CONFIG";

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use workforce_analytics::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/analytics.yaml")?;
/// println!("Listening on {}", loader.config().server.bind_address());
/// # Ok::<(), workforce_analytics::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml(&content, &path_str)?;
        info!(path = %path_str, "Loaded configuration");
        Ok(loader)
    }

    /// Loads configuration from the path in `ANALYTICS_CONFIG`, falling back
    /// to [`DEFAULT_CONFIG_PATH`].
    pub fn load_from_env() -> EngineResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load(path)
    }

    /// Parses configuration from YAML text; `origin` names the source in errors.
    pub fn from_yaml(content: &str, origin: &str) -> EngineResult<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config, origin)?;
        Ok(Self { config })
    }

    fn validate(config: &AppConfig, origin: &str) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: origin.to_string(),
            message: message.to_string(),
        };

        if config.server.port == 0 {
            return Err(invalid("server.port must be non-zero"));
        }
        if config.server.host.trim().is_empty() {
            return Err(invalid("server.host must not be empty"));
        }
        if config.reports.top_employees == 0 {
            return Err(invalid("reports.top_employees must be at least 1"));
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
