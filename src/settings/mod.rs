//! File-backed project settings: the import hint and the linked projects.
//!
//! Settings live in `<project>/.gradle-import/project.toml`. The file is
//! optional; a missing file means no hint and no linked projects.
//!
//! ```toml
//! [import_hint]
//! skip = false
//! projects_to_import = ["app/build.gradle"]
//!
//! [linked]
//! projects = ["."]
//! ```

use crate::env;
use crate::import::{ImportHint, ImportHintStore, LinkedProjectSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors while reading project settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Projects already linked to the host project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkedSection {
    /// Project roots, relative paths are resolved against the base directory
    #[serde(default)]
    pub projects: Vec<PathBuf>,
}

/// On-disk layout of `project.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSettingsFile {
    #[serde(default)]
    pub import_hint: ImportHint,
    #[serde(default)]
    pub linked: LinkedSection,
}

impl ProjectSettingsFile {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings of one project, loaded once per session
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    base_dir: PathBuf,
    file: ProjectSettingsFile,
}

impl ProjectSettings {
    /// Load `<base_dir>/.gradle-import/project.toml`, defaults if absent
    pub fn load(base_dir: &Path) -> Result<Self, SettingsError> {
        let path = env::project_settings_file_path(base_dir);
        let file = if path.is_file() {
            debug!("Loading project settings from {:?}", path);
            let content = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            ProjectSettingsFile::from_toml_str(&content, &path)?
        } else {
            debug!("No project settings at {:?}, using defaults", path);
            ProjectSettingsFile::default()
        };

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            file,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Replace the hinted projects, e.g. from command line arguments
    pub fn override_projects_to_import(&mut self, projects: Vec<PathBuf>) {
        self.file.import_hint.projects_to_import = projects;
    }

    pub fn set_skip(&mut self, skip: bool) {
        self.file.import_hint.skip = skip;
    }
}

impl ImportHintStore for ProjectSettings {
    fn import_hint(&self) -> ImportHint {
        self.file.import_hint.clone()
    }
}

impl LinkedProjectSettings for ProjectSettings {
    fn linked_projects(&self) -> Vec<PathBuf> {
        self.file
            .linked
            .projects
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    self.base_dir.join(path)
                }
            })
            .collect()
    }
}
