use crate::import::ports::TriggerError;
use crate::import::types::LifecycleState;
use std::fmt;
use std::path::PathBuf;

/// A task that did not reach `SUCCESS`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    pub project_id: String,
    pub state: LifecycleState,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} import failed. Project import status: {}",
            self.project_id, self.state
        )
    }
}

/// Fatal outcomes of an import session
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// An explicitly hinted build file does not exist
    #[error("Cannot find hinted build file: {}", path.display())]
    MissingHintedBuildFile { path: PathBuf },

    /// One or more triggered tasks ended in a state other than `SUCCESS`
    #[error("{}", format_failures(.0))]
    ImportFailed(Vec<TaskFailure>),

    /// The build-tool integration could not launch an import at all
    #[error("Import trigger error: {0}")]
    Trigger(#[from] TriggerError),
}

impl ImportError {
    /// Failing tasks, empty for errors raised before any task settled
    pub fn failures(&self) -> &[TaskFailure] {
        match self {
            Self::ImportFailed(failures) => failures,
            _ => &[],
        }
    }
}

fn format_failures(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_format() {
        let error = ImportError::ImportFailed(vec![
            TaskFailure {
                project_id: "app".to_string(),
                state: LifecycleState::Failure,
            },
            TaskFailure {
                project_id: "lib".to_string(),
                state: LifecycleState::Cancelled,
            },
        ]);

        assert_eq!(
            error.to_string(),
            "app import failed. Project import status: FAILURE\n\
             lib import failed. Project import status: CANCELLED"
        );
        assert_eq!(error.failures().len(), 2);
    }

    #[test]
    fn test_missing_file_message_names_path() {
        let error = ImportError::MissingHintedBuildFile {
            path: PathBuf::from("/proj/sub/build.gradle"),
        };
        assert!(error.to_string().contains("/proj/sub/build.gradle"));
        assert!(error.failures().is_empty());
    }
}
