//! Configuration loading and management for the analytics service.
//!
//! This module loads the service configuration from a YAML file: the
//! HTTP listener, report rendering options and optional seed CSV files.
//!
//! # Example
//!
//! ```no_run
//! use workforce_analytics::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/analytics.yaml").unwrap();
//! println!("Top employees in reports: {}", config.config().reports.top_employees);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
pub use types::{AppConfig, ReportConfig, SeedConfig, ServerConfig};
