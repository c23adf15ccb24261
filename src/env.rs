//! Environment constants and path utilities for the Gradle import coordinator.
//!
//! This module centralizes all hardcoded paths and file names used throughout
//! the application, making them easier to maintain and modify.

use std::path::{Path, PathBuf};

/// Tool directory name (hidden directory like .git, .idea)
pub const TOOL_DIR_NAME: &str = ".gradle-import";

/// Configuration file name inside the tool directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration file name when placed directly in a directory
pub const STANDALONE_CONFIG_FILE_NAME: &str = "gradle-import.toml";

/// Per-project settings file (import hint, linked projects)
pub const PROJECT_SETTINGS_FILE_NAME: &str = "project.toml";

/// Logs directory name within the tool directory
pub const LOGS_DIR_NAME: &str = "logs";

/// Raw task output log file name
pub const OUTPUT_LOG_FILE_NAME: &str = "gradle-import.log";

/// Build script names recognised at a project root, in preference order
pub const BUILD_SCRIPT_NAMES: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// Gradle wrapper script name
#[cfg(not(windows))]
pub const GRADLE_WRAPPER_NAME: &str = "gradlew";

/// Gradle wrapper script name
#[cfg(windows)]
pub const GRADLE_WRAPPER_NAME: &str = "gradlew.bat";

/// Gradle executable looked up on `PATH`
pub const GRADLE_EXECUTABLE_NAME: &str = "gradle";

/// Build the tool directory path from a project root
pub fn tool_dir_path(project_root: &Path) -> PathBuf {
    project_root.join(TOOL_DIR_NAME)
}

/// Build the per-project settings file path
pub fn project_settings_file_path(project_root: &Path) -> PathBuf {
    tool_dir_path(project_root).join(PROJECT_SETTINGS_FILE_NAME)
}

/// Default logs directory, relative to the project being imported
pub fn default_logs_dir_path() -> PathBuf {
    PathBuf::from(TOOL_DIR_NAME).join(LOGS_DIR_NAME)
}

/// Build the Gradle wrapper path for a project root
pub fn gradle_wrapper_path(project_root: &Path) -> PathBuf {
    project_root.join(GRADLE_WRAPPER_NAME)
}

/// Build config directory path in user's home directory
pub fn user_config_dir_path(home_dir: &Path) -> PathBuf {
    home_dir.join(TOOL_DIR_NAME)
}

/// Build config file path in user's home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    user_config_dir_path(home_dir).join(CONFIG_FILE_NAME)
}

/// Build local config file path in current directory
pub fn local_config_file_path(current_dir: &Path) -> PathBuf {
    tool_dir_path(current_dir).join(CONFIG_FILE_NAME)
}
