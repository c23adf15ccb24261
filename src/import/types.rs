use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Identifier of one external import task.
///
/// Created by the build-tool integration when it launches a task, never by
/// the orchestration core. `project_id` is the external project identifier
/// reported when the task does not succeed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    pub project_id: String,
    pub id: Uuid,
}

impl TaskId {
    /// Allocate a fresh task identifier for the given external project
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            id: Uuid::new_v4(),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.project_id, self.id)
    }
}

/// Last known lifecycle state of an import task.
///
/// Transition order is not enforced; the aggregator keeps the last write.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Started,
    Cancelled,
    Failure,
    Success,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Cancelled => "CANCELLED",
            Self::Failure => "FAILURE",
            Self::Success => "SUCCESS",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-project import hint, owned by the project settings store.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportHint {
    /// Skip the import session entirely
    #[serde(default)]
    pub skip: bool,
    /// Build files to import explicitly, relative to the project base directory
    #[serde(default)]
    pub projects_to_import: Vec<PathBuf>,
}

impl ImportHint {
    pub fn skip() -> Self {
        Self {
            skip: true,
            projects_to_import: Vec::new(),
        }
    }

    pub fn with_projects<I, P>(projects: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            skip: false,
            projects_to_import: projects.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_projects(&self) -> bool {
        !self.projects_to_import.is_empty()
    }
}

/// Whether a strategy took over the session.
///
/// The first strategy that reports `Handled` ends selection, even when its
/// tasks later fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyOutcome {
    Handled,
    NotApplicable,
}

impl StrategyOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// How the trigger call relates to the task it launches
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaitMode {
    /// Return only after the task's terminal notification has been delivered
    #[default]
    Synchronous,
    /// Launch the task and return immediately
    Background,
}

/// One import to hand over to the build-tool integration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRequest {
    pub project_root: PathBuf,
    pub build_file: Option<PathBuf>,
    pub wait: WaitMode,
}

impl ImportRequest {
    /// Synchronous import rooted at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            build_file: None,
            wait: WaitMode::Synchronous,
        }
    }

    /// Synchronous import of an explicit build file, rooted at its directory
    pub fn for_build_file(build_file: impl Into<PathBuf>) -> Self {
        let build_file = build_file.into();
        let project_root = build_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_build_file(project_root, build_file)
    }

    /// Synchronous import rooted at `project_root` using an explicit build file
    pub fn with_build_file(project_root: impl Into<PathBuf>, build_file: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            build_file: Some(build_file.into()),
            wait: WaitMode::Synchronous,
        }
    }

    pub fn with_wait(mut self, wait: WaitMode) -> Self {
        self.wait = wait;
        self
    }
}

/// Final state of one task as reported by a finished session
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskReport {
    pub task_id: Uuid,
    pub project_id: String,
    pub state: LifecycleState,
}

/// Summary of a successful import session
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// The import hint asked to skip this session
    pub skipped: bool,
    /// Name of the strategy that handled the session, if any did
    pub strategy: Option<String>,
    pub tasks: Vec<TaskReport>,
}

impl ImportReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_request_is_rooted_at_parent() {
        let request = ImportRequest::for_build_file("/work/app/lib/build.gradle");

        assert_eq!(request.project_root, PathBuf::from("/work/app/lib"));
        assert_eq!(
            request.build_file,
            Some(PathBuf::from("/work/app/lib/build.gradle"))
        );
        assert_eq!(request.wait, WaitMode::Synchronous);
    }

    #[test]
    fn test_bare_build_file_is_rooted_at_current_directory() {
        let request = ImportRequest::for_build_file("build.gradle");

        assert_eq!(request.project_root, PathBuf::from("."));
        assert_eq!(request.build_file, Some(PathBuf::from("build.gradle")));
    }
}
