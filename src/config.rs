//! Configuration module
//!
//! Application settings are read from a TOML file. Every section and field
//! has a default, so a missing file or a partial one is fine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{CompatibilityPolicy, VehicleClass};
use crate::notifications::DispatchPolicy;
use crate::shared::errors::ConfigError;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "EVCS_CONFIG";

/// `~/.config/ev-charging/config.toml`, or `./config.toml` when no config
/// directory can be determined.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("ev-charging").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationsConfig,
    pub compatibility: CompatibilityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
    /// Expose `/metrics` in Prometheus text format
    pub metrics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            metrics: true,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `ev_charging=debug`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub failure_policy: DispatchPolicy,
}

/// Per-class kW limits merged over the built-in table.
///
/// ```toml
/// [compatibility.overrides]
/// Compact = 60.0
/// SUV = 175.0
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityConfig {
    pub overrides: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Load the sample providers, stations and users at startup
    pub demo_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo_data: true }
    }
}

impl AppConfig {
    /// Read the file at `path`. A missing or empty file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "logging.format must be 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        }
        self.compatibility_policy().map(|_| ())
    }

    /// The built-in compatibility table with the configured overrides
    /// applied.
    pub fn compatibility_policy(&self) -> Result<CompatibilityPolicy, ConfigError> {
        let mut policy = CompatibilityPolicy::standard();
        for (class, limit) in &self.compatibility.overrides {
            let class: VehicleClass = class
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("unknown vehicle class '{}'", class)))?;
            if !limit.is_finite() || *limit < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "compatibility limit for {} must be a non-negative number",
                    class
                )));
            }
            policy = policy.with_limit(class, *limit);
        }
        Ok(policy)
    }
}
