//! YAML configuration and the resolved settings handed to the samplers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use basicmon_sampler::SamplerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {field} '{value}': {source}")]
    Duration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub refresh_interval: String,
    pub disk_path: String,
    /// Falls back to `refresh_interval` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_refresh_interval: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: "1s".into(),
            disk_path: "/".into(),
            process_refresh_interval: None,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults; anything else unreadable is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        // an empty file deserializes to unit, not to an empty map
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn refresh(&self) -> Result<Duration, ConfigError> {
        parse_interval("refreshInterval", &self.refresh_interval)
    }

    pub fn process_refresh(&self) -> Result<Duration, ConfigError> {
        match self.process_refresh_interval.as_deref() {
            Some(v) => parse_interval("processRefreshInterval", v),
            None => self.refresh(),
        }
    }
}

pub fn parse_interval(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let d = humantime::parse_duration(value.trim()).map_err(|source| ConfigError::Duration {
        field,
        value: value.to_string(),
        source,
    })?;
    if d.is_zero() {
        return Err(ConfigError::ZeroDuration { field });
    }
    Ok(d)
}

/// `./config.yaml` if present, else `<config dir>/basicmon/config.yaml`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    config_dir().join(DEFAULT_CONFIG_FILE)
}

fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("basicmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("basicmon")
    }
}

/// Config file merged with command line overrides, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub refresh: Duration,
    pub process_refresh: Duration,
    pub disk_path: PathBuf,
    pub interface: Option<String>,
    pub show_processes: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        let config = Config::load(&path)?;
        Self::from_parts(config, cli)
    }

    /// Flags win over file values.
    pub fn from_parts(mut config: Config, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(interval) = &cli.interval {
            config.refresh_interval = interval.clone();
        }
        if let Some(disk) = &cli.disk {
            config.disk_path = disk.clone();
        }
        Ok(Self {
            refresh: config.refresh()?,
            process_refresh: config.process_refresh()?,
            disk_path: PathBuf::from(config.disk_path),
            interface: cli.iface.clone().filter(|s| !s.is_empty()),
            show_processes: cli.processes,
        })
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        let mut cfg = SamplerConfig::new(self.refresh, self.disk_path.clone());
        cfg.process_interval = self.process_refresh;
        cfg.interface = self.interface.clone();
        cfg
    }
}
