//! Gradle command line construction.

use super::config::GradleConfig;
use crate::env;
use crate::import::{ImportRequest, TriggerError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use which::which;

/// A fully resolved Gradle invocation for one import task
#[derive(Debug, Clone, PartialEq)]
pub struct GradleCommand {
    /// Executable to run (wrapper script or Gradle binary)
    pub program: PathBuf,
    /// Command line arguments
    pub args: Vec<String>,
    /// Working directory, always the import root
    pub working_dir: PathBuf,
    /// Environment variables to set
    pub env: HashMap<String, String>,
    /// Maximum run time before the task is cancelled
    pub timeout: Option<Duration>,
}

impl GradleCommand {
    /// Build the invocation for an import request
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidProjectRoot`] if the root is not a
    /// directory and [`TriggerError::ExecutableNotFound`] if neither a
    /// wrapper, a configured executable nor `gradle` on `PATH` is available.
    pub fn for_request(config: &GradleConfig, request: &ImportRequest) -> Result<Self, TriggerError> {
        let root = &request.project_root;
        if !root.is_dir() {
            return Err(TriggerError::InvalidProjectRoot(root.clone()));
        }

        let program = resolve_executable(config, root).ok_or_else(|| {
            TriggerError::ExecutableNotFound {
                project_root: root.clone(),
            }
        })?;

        let mut args = vec![
            "--project-dir".to_string(),
            root.display().to_string(),
        ];
        if let Some(build_file) = &request.build_file
            && !is_default_build_script(build_file)
        {
            args.push("--build-file".to_string());
            args.push(build_file.display().to_string());
        }
        if config.offline {
            args.push("--offline".to_string());
        }
        args.extend(config.arguments.iter().cloned());

        Ok(Self {
            program,
            args,
            working_dir: root.clone(),
            env: config.env.clone(),
            timeout: config.timeout(),
        })
    }

    /// Human readable command line for logs
    pub fn display_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Wrapper in the project root, configured executable, then `gradle` on `PATH`
pub fn resolve_executable(config: &GradleConfig, project_root: &Path) -> Option<PathBuf> {
    if config.prefer_wrapper {
        let wrapper = env::gradle_wrapper_path(project_root);
        if wrapper.is_file() {
            debug!("Using Gradle wrapper {:?}", wrapper);
            return Some(wrapper);
        }
    }

    if let Some(executable) = &config.executable {
        return Some(executable.clone());
    }

    which(env::GRADLE_EXECUTABLE_NAME).ok()
}

fn is_default_build_script(build_file: &Path) -> bool {
    build_file
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| env::BUILD_SCRIPT_NAMES.contains(&name))
}
