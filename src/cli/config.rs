//! Configuration discovery and loading
//!
//! This module handles the configuration discovery hierarchy:
//! 1. Current directory: ./gradle-import.toml or ./.gradle-import/config.toml
//! 2. User config: ~/.gradle-import/config.toml
//! 3. System config: /etc/gradle-import/config.toml
//! 4. Built-in defaults

use crate::diagnostics::OutputLogConfig;
use crate::env;
use crate::gradle::GradleConfig;
use crate::import::ConfiguratorConfig;
use serde::{Deserialize, Serialize};
use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Tool-wide configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportToolConfig {
    /// Build script names checked in the project root, in preference order
    #[serde(default = "default_build_script_names")]
    pub build_script_names: Vec<String>,

    /// Initial value of the auto-import disabled switch (default: true)
    #[serde(default = "default_auto_import_disabled")]
    pub auto_import_disabled: bool,

    #[serde(default)]
    pub gradle: GradleConfig,

    #[serde(default)]
    pub diagnostics: OutputLogConfig,
}

fn default_build_script_names() -> Vec<String> {
    ConfiguratorConfig::default().build_script_names
}

fn default_auto_import_disabled() -> bool {
    true
}

impl Default for ImportToolConfig {
    fn default() -> Self {
        Self {
            build_script_names: default_build_script_names(),
            auto_import_disabled: default_auto_import_disabled(),
            gradle: GradleConfig::default(),
            diagnostics: OutputLogConfig::default(),
        }
    }
}

impl ImportToolConfig {
    /// Settings consumed by the project configurator
    pub fn configurator_config(&self) -> ConfiguratorConfig {
        ConfiguratorConfig {
            build_script_names: self.build_script_names.clone(),
            output_log: Some(self.diagnostics.clone()),
        }
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Save to TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration discovery system
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover and load configuration using the hierarchy
    pub fn discover_config() -> Result<ImportToolConfig, ConfigError> {
        if let Some(config_path) = Self::find_config_file() {
            info!("Loading configuration from: {:?}", config_path);
            return ImportToolConfig::from_toml_file(config_path);
        }

        info!("No configuration file found, using defaults");
        Ok(ImportToolConfig::default())
    }

    /// Find configuration file using discovery hierarchy
    pub fn find_config_file() -> Option<PathBuf> {
        for candidate in Self::get_config_candidates() {
            debug!("Checking for config file: {:?}", candidate);
            if candidate.is_file() {
                debug!("Found config file: {:?}", candidate);
                return Some(candidate);
            }
        }

        debug!("No config file found in discovery hierarchy");
        None
    }

    /// Get list of configuration file candidates in priority order
    fn get_config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(current_dir) = std_env::current_dir() {
            candidates.push(current_dir.join(env::STANDALONE_CONFIG_FILE_NAME));
            candidates.push(env::local_config_file_path(&current_dir));
        }

        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(env::user_config_file_path(&home_dir));
        }

        #[cfg(unix)]
        candidates.push(PathBuf::from("/etc/gradle-import/config.toml"));

        #[cfg(windows)]
        if let Ok(program_data) = std_env::var("PROGRAMDATA") {
            candidates.push(
                PathBuf::from(program_data)
                    .join("gradle-import")
                    .join("config.toml"),
            );
        }

        candidates
    }

    fn get_home_dir() -> Option<PathBuf> {
        std_env::var("HOME")
            .ok()
            .or_else(|| std_env::var("USERPROFILE").ok())
            .map(PathBuf::from)
    }

    /// Create a default config file in the user's home directory
    pub fn create_default_user_config() -> Result<PathBuf, ConfigError> {
        let home_dir = Self::get_home_dir().ok_or(ConfigError::NoHomeDir)?;
        Self::create_default_config_in(&env::user_config_dir_path(&home_dir))
    }

    fn create_default_config_in(config_dir: &Path) -> Result<PathBuf, ConfigError> {
        let config_path = config_dir.join(env::CONFIG_FILE_NAME);

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|source| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source,
            })?;
            info!("Created configuration directory: {:?}", config_dir);
        }

        if config_path.exists() {
            warn!("Configuration file already exists: {:?}", config_path);
        } else {
            ImportToolConfig::default().to_toml_file(&config_path)?;
            info!("Created default configuration file: {:?}", config_path);
        }

        Ok(config_path)
    }

    /// Show configuration discovery information for debugging
    pub fn show_discovery_info() {
        println!("Configuration Discovery Hierarchy:");
        println!();

        for (i, candidate) in Self::get_config_candidates().iter().enumerate() {
            let status = if candidate.is_file() {
                "EXISTS"
            } else if candidate.exists() {
                "NOT A FILE"
            } else {
                "NOT FOUND"
            };
            println!("  {}. {:?} - {}", i + 1, candidate, status);
        }

        println!();
        match Self::find_config_file() {
            Some(found) => println!("Active configuration: {:?}", found),
            None => println!("Active configuration: Built-in defaults"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ImportToolConfig::default();

        assert_eq!(config.build_script_names, vec!["build.gradle", "build.gradle.kts"]);
        assert!(config.auto_import_disabled);
        assert_eq!(
            config.configurator_config().output_log,
            Some(OutputLogConfig::default())
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = ImportToolConfig::from_toml_str(
            "auto_import_disabled = false\n\n[gradle]\noffline = true\n",
            Path::new("inline.toml"),
        )
        .unwrap();

        assert!(!config.auto_import_disabled);
        assert!(config.gradle.offline);
        assert!(config.gradle.prefer_wrapper);
        assert_eq!(config.build_script_names, default_build_script_names());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("gradle-import.toml");

        let original = ImportToolConfig {
            build_script_names: vec!["settings.gradle".to_string()],
            ..Default::default()
        };
        original.to_toml_file(&config_path).unwrap();

        let loaded = ImportToolConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_create_default_config_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join(".gradle-import");

        let path = ConfigDiscovery::create_default_config_in(&config_dir).unwrap();
        fs::write(&path, "auto_import_disabled = false\n").unwrap();
        ConfigDiscovery::create_default_config_in(&config_dir).unwrap();

        let loaded = ImportToolConfig::from_toml_file(&path).unwrap();
        assert!(!loaded.auto_import_disabled);
    }

    #[test]
    #[serial]
    fn test_current_directory_config_is_discovered_first() {
        let temp_dir = TempDir::new().unwrap();
        let previous = std_env::current_dir().unwrap();
        std_env::set_current_dir(temp_dir.path()).unwrap();

        let local = temp_dir.path().join(env::STANDALONE_CONFIG_FILE_NAME);
        fs::write(&local, "build_script_names = [\"build.gradle.kts\"]\n").unwrap();

        let found = ConfigDiscovery::find_config_file();
        let discovered = ConfigDiscovery::discover_config();
        std_env::set_current_dir(previous).unwrap();

        assert_eq!(
            found.map(|p| p.file_name().unwrap().to_owned()),
            Some(local.file_name().unwrap().to_owned())
        );
        assert_eq!(
            discovered.unwrap().build_script_names,
            vec!["build.gradle.kts".to_string()]
        );
    }
}
