//! Configuration file (erik.toml, ~/.erik/config.toml)
//!
//! Both files share one schema. Every field is optional; the loader merges the
//! global file, the project file and the environment, in that order.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where output goes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Stdout,
    Stderr,
    File,
}

impl FromStr for OutputKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> ConfigResult<Self> {
        match value.to_lowercase().as_str() {
            "stdout" => Ok(OutputKind::Stdout),
            "stderr" => Ok(OutputKind::Stderr),
            "file" => Ok(OutputKind::File),
            _ => Err(ConfigError::InvalidValue {
                field: "output".to_string(),
                reason: format!("must be 'stdout', 'stderr', or 'file', got '{}'", value),
            }),
        }
    }
}

/// Terminal colour preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    Auto,
    Always,
    Never,
}

impl FromStr for ColorSetting {
    type Err = ConfigError;

    fn from_str(value: &str) -> ConfigResult<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(ColorSetting::Auto),
            "always" => Ok(ColorSetting::Always),
            "never" => Ok(ColorSetting::Never),
            _ => Err(ConfigError::InvalidValue {
                field: "color".to_string(),
                reason: format!("must be 'auto', 'always', or 'never', got '{}'", value),
            }),
        }
    }
}

/// Contents of an erik config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ErikConfig {
    /// Initial state of the print-enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputKind>,

    /// Target of `output = "file"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSetting>,

    /// Print `line:column` instead of `line`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_column: Option<bool>,

    /// Maximum level routed from the `log` facade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl ErikConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.output == Some(OutputKind::File) {
            if let Some(file) = &self.file {
                if file.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "file".to_string(),
                        reason: "output is 'file' but the path is empty".to_string(),
                    });
                }
            }
        }

        if let Some(level) = &self.log_level {
            parse_log_level(level)?;
        }

        Ok(())
    }

    /// Get the global config file path (~/.erik/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".erik").join("config.toml"))
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &ErikConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.file.is_some() {
            self.file = other.file.clone();
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.show_column.is_some() {
            self.show_column = other.show_column;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level.clone();
        }
    }
}

pub(crate) fn parse_log_level(value: &str) -> ConfigResult<log::LevelFilter> {
    log::LevelFilter::from_str(value).map_err(|_| ConfigError::InvalidValue {
        field: "log_level".to_string(),
        reason: format!(
            "must be one of off, error, warn, info, debug, trace; got '{}'",
            value
        ),
    })
}
