//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::config::{parse_log_level, ColorSetting, ErikConfig, OutputKind};
use crate::printer::{ColorMode, Printer, Sink};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = "erik.toml";

/// Default output file, `<temp dir>/erik.out`
pub fn default_output_file() -> PathBuf {
    env::temp_dir().join("erik.out")
}

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.erik/config.toml) - lowest priority
/// 2. Project config (./erik.toml, searched upwards) - overrides global
/// 3. Environment variables (ERIK_*) - highest priority
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective settings after merging
    pub settings: ErikConfig,

    /// Directory where erik.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use a specific global config file instead of ~/.erik/config.toml
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find erik.toml, layers it over the
    /// global config, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        self.finish(project_root, project_config)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ErikConfig::load_from_file(config_path)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());
        self.finish(project_root, project_config)
    }

    fn finish(
        &mut self,
        project_root: Option<PathBuf>,
        project_config: ErikConfig,
    ) -> ConfigResult<Config> {
        // A missing home directory just means no global layer
        let mut settings = match self.load_global_config() {
            Ok(global) => global,
            Err(ConfigError::HomeNotFound) => ErikConfig::default(),
            Err(e) => return Err(e),
        };
        settings.merge(&project_config);

        let settings = self.apply_env_overrides(settings)?;
        settings.validate()?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, ErikConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = ErikConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ErikConfig::default())),
            }
        }
    }

    /// Load global configuration from ~/.erik/config.toml
    fn load_global_config(&mut self) -> ConfigResult<ErikConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = ErikConfig::global_config_path()?;
                self.global_config_path = Some(path.clone());
                path
            }
        };

        // Global config is optional - if it doesn't exist, return default
        if !path.exists() {
            return Ok(ErikConfig::default());
        }

        ErikConfig::load_from_file(&path)
    }

    /// Apply environment variable overrides
    ///
    /// Recognised: ERIK_ENABLED, ERIK_OUTPUT, ERIK_FILE, ERIK_COLOR,
    /// ERIK_SHOW_COLUMN, ERIK_LOG_LEVEL
    fn apply_env_overrides(&self, mut config: ErikConfig) -> ConfigResult<ErikConfig> {
        if let Ok(enabled) = env::var("ERIK_ENABLED") {
            config.enabled = Some(parse_bool("ERIK_ENABLED", &enabled)?);
        }

        if let Ok(output) = env::var("ERIK_OUTPUT") {
            config.output = Some(output.parse()?);
        }

        if let Ok(file) = env::var("ERIK_FILE") {
            config.file = Some(PathBuf::from(file));
        }

        if let Ok(color) = env::var("ERIK_COLOR") {
            config.color = Some(color.parse()?);
        }

        if let Ok(show_column) = env::var("ERIK_SHOW_COLUMN") {
            config.show_column = Some(parse_bool("ERIK_SHOW_COLUMN", &show_column)?);
        }

        if let Ok(level) = env::var("ERIK_LOG_LEVEL") {
            config.log_level = Some(level);
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected true/false, 1/0 or yes/no, got '{}'", value),
        }),
    }
}

impl Config {
    /// Initial state of the print-enabled flag (default: on)
    pub fn enabled(&self) -> bool {
        self.settings.enabled.unwrap_or(true)
    }

    pub fn output(&self) -> OutputKind {
        self.settings.output.unwrap_or(OutputKind::Stdout)
    }

    pub fn color(&self) -> ColorMode {
        match self.settings.color {
            Some(ColorSetting::Always) => ColorMode::Always,
            Some(ColorSetting::Never) => ColorMode::Never,
            Some(ColorSetting::Auto) | None => ColorMode::Auto,
        }
    }

    pub fn show_column(&self) -> bool {
        self.settings.show_column.unwrap_or(false)
    }

    /// Maximum level for the `log` bridge (default: trace)
    pub fn log_level(&self) -> ConfigResult<log::LevelFilter> {
        match &self.settings.log_level {
            Some(level) => parse_log_level(level),
            None => Ok(log::LevelFilter::Trace),
        }
    }

    pub fn sink(&self) -> Sink {
        match self.output() {
            OutputKind::Stdout => Sink::Stdout,
            OutputKind::Stderr => Sink::Stderr,
            OutputKind::File => Sink::File(
                self.settings
                    .file
                    .clone()
                    .unwrap_or_else(default_output_file),
            ),
        }
    }

    /// Printer described by this configuration
    pub fn printer(&self) -> Printer {
        Printer::new(self.sink())
            .with_color(self.color())
            .with_column(self.show_column())
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an erik.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn isolated_loader(temp_dir: &TempDir) -> ConfigLoader {
        ConfigLoader::with_global_config_path(temp_dir.path().join("no-global.toml"))
    }

    #[test]
    #[serial]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "enabled = false\noutput = \"stderr\"");

        let config = isolated_loader(&temp_dir)
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert!(!config.enabled());
        assert_eq!(config.output(), OutputKind::Stderr);
        assert!(config.is_project());
    }

    #[test]
    #[serial]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "show_column = true");

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let config = isolated_loader(&temp_dir)
            .load_from_directory(&sub_dir)
            .unwrap();

        assert!(config.show_column());
        assert_eq!(config.project_root(), Some(temp_dir.path()));
    }

    #[test]
    #[serial]
    fn test_global_config_layered_under_project() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        fs::write(&global, "color = \"never\"\nenabled = false").unwrap();

        let project = temp_dir.path().join("project");
        fs::create_dir(&project).unwrap();
        create_config_file(&project, "enabled = true");

        let config = ConfigLoader::with_global_config_path(&global)
            .load_from_directory(&project)
            .unwrap();

        assert!(config.enabled());
        assert_eq!(config.color(), ColorMode::Never);
    }

    #[test]
    #[serial]
    fn test_env_override_enabled() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "enabled = true");

        env::set_var("ERIK_ENABLED", "false");
        let config = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());
        env::remove_var("ERIK_ENABLED");

        assert!(!config.unwrap().enabled());
    }

    #[test]
    #[serial]
    fn test_env_override_invalid_output() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("ERIK_OUTPUT", "carrier-pigeon");
        let result = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());
        env::remove_var("ERIK_OUTPUT");

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enabled());
        assert_eq!(config.output(), OutputKind::Stdout);
        assert_eq!(config.color(), ColorMode::Auto);
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Trace);
        assert!(matches!(config.sink(), Sink::Stdout));
    }

    #[test]
    fn test_file_sink_defaults_to_temp_dir() {
        let config = Config {
            settings: ErikConfig {
                output: Some(OutputKind::File),
                ..Default::default()
            },
            project_root: None,
        };

        match config.sink() {
            Sink::File(path) => assert_eq!(path, default_output_file()),
            other => panic!("expected file sink, got {:?}", other),
        }
    }
}
