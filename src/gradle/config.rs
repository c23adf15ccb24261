//! Gradle invocation settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// How the Gradle CLI is located and invoked for an import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradleConfig {
    /// Explicit Gradle executable, used when no wrapper applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,

    /// Use the project's `gradlew` when present (default: true)
    #[serde(default = "default_prefer_wrapper")]
    pub prefer_wrapper: bool,

    /// Pass `--offline` to Gradle
    #[serde(default)]
    pub offline: bool,

    /// Arguments appended after the project selection flags
    #[serde(default = "default_arguments")]
    pub arguments: Vec<String>,

    /// Cancel an import task after this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Extra environment variables for the Gradle process
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

fn default_prefer_wrapper() -> bool {
    true
}

fn default_arguments() -> Vec<String> {
    vec!["--console=plain".to_string(), "projects".to_string()]
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self {
            executable: None,
            prefer_wrapper: default_prefer_wrapper(),
            offline: false,
            arguments: default_arguments(),
            timeout_secs: None,
            env: HashMap::new(),
        }
    }
}

impl GradleConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
