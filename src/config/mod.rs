//! Application configuration.
//!
//! Aggregates bus selection and publisher addressing into a single Config
//! struct that can be loaded from YAML files or environment variables.

use serde::Deserialize;
use vss_client::{BusConfig, ConfigError, Publisher, PublisherConfig};

/// System-wide configuration file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/vss-lib/vss.yaml";
/// Default configuration file name in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vss.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "VSS_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "VSS";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "VSS_LOG";
/// Environment variable for log line format (`text` or `json`).
pub const LOG_FORMAT_ENV_VAR: &str = "VSS_LOG_FORMAT";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which message bus to connect to.
    pub bus: BusConfig,
    /// Remote service addressing and call timeout.
    pub publisher: PublisherConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `SYSTEM_CONFIG_FILE` (if exists)
    /// 2. `vss.yaml` in current directory (if exists)
    /// 3. File specified by `path` argument (if provided)
    /// 4. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 5. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(SYSTEM_CONFIG_FILE, FileFormat::Yaml).required(false))
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            // e.g. VSS__PUBLISHER__METHOD_NAME, VSS__BUS__TYPE
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        Ok(config)
    }

    /// Build the D-Bus publisher described by this configuration.
    pub fn publisher(&self) -> Result<Publisher, ConfigError> {
        Publisher::from_config(&self.bus, &self.publisher)
    }
}
