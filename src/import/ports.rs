//! Narrow interfaces to the collaborators an import session depends on.
//!
//! The host owns the project settings and the build-tool integration; the
//! session only reads the former and drives the latter through these traits.

use crate::import::notification::NotificationDispatcher;
use crate::import::types::{ImportHint, ImportRequest};
use async_trait::async_trait;
use std::path::PathBuf;

/// Read-only source of the per-project import hint
pub trait ImportHintStore: Send + Sync {
    fn import_hint(&self) -> ImportHint;
}

impl ImportHintStore for ImportHint {
    fn import_hint(&self) -> ImportHint {
        self.clone()
    }
}

/// Read-only view of the projects already linked to the host project
pub trait LinkedProjectSettings: Send + Sync {
    /// Absolute root paths of the linked external projects
    fn linked_projects(&self) -> Vec<PathBuf>;

    fn has_linked_projects(&self) -> bool {
        !self.linked_projects().is_empty()
    }
}

impl LinkedProjectSettings for Vec<PathBuf> {
    fn linked_projects(&self) -> Vec<PathBuf> {
        self.clone()
    }
}

/// Entry point into the external build-tool integration.
///
/// Implementations allocate a [`crate::import::TaskId`] per launched task and
/// report its lifecycle through the dispatcher. With
/// [`crate::import::WaitMode::Synchronous`] a call returns only after the
/// terminal notification of every task it launched has been dispatched.
#[async_trait]
pub trait ImportTrigger: Send + Sync {
    /// Import a single project rooted at `request.project_root`
    async fn import_project(
        &self,
        request: ImportRequest,
        notifier: &NotificationDispatcher,
    ) -> Result<(), TriggerError>;

    /// Refresh the model of every already linked project
    async fn refresh_linked_projects(
        &self,
        linked: &[PathBuf],
        notifier: &NotificationDispatcher,
    ) -> Result<(), TriggerError>;
}

/// Failures to launch an import task at all.
///
/// A task that was launched and then failed is reported through
/// notifications instead.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// No build-tool executable could be located for the project
    #[error("Gradle executable not found for {}", project_root.display())]
    ExecutableNotFound { project_root: PathBuf },

    /// The import root is not a directory
    #[error("Import root is not a directory: {}", .0.display())]
    InvalidProjectRoot(PathBuf),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}
