//! Import trigger backed by the Gradle command line.
//!
//! Every import is one Gradle process. Its lifecycle is reported through the
//! session's [`NotificationDispatcher`]: `Started` before spawning, one
//! `Output` per stdout/stderr line, then `Success`, `Failure` or, when the
//! configured timeout elapses, `Cancelled`.

use super::command::GradleCommand;
use super::config::GradleConfig;
use crate::import::{
    AutoImportRegistry, ImportRequest, ImportTrigger, NotificationDispatcher, OutputStream,
    TaskId, TriggerError, WaitMode,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Runs Gradle on the host for every import request
#[derive(Debug, Clone)]
pub struct GradleCliTrigger {
    config: GradleConfig,
    registry: Arc<AutoImportRegistry>,
}

impl GradleCliTrigger {
    pub fn new(config: GradleConfig, registry: Arc<AutoImportRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &GradleConfig {
        &self.config
    }

    /// External project identifier for an import root
    pub fn project_id(project_root: &Path) -> String {
        project_root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| project_root.display().to_string())
    }
}

#[async_trait]
impl ImportTrigger for GradleCliTrigger {
    async fn import_project(
        &self,
        request: ImportRequest,
        notifier: &NotificationDispatcher,
    ) -> Result<(), TriggerError> {
        let command = GradleCommand::for_request(&self.config, &request)?;
        let task_id = TaskId::new(Self::project_id(&request.project_root));
        info!("Launching import task {}: {}", task_id, command.display_line());

        match request.wait {
            WaitMode::Synchronous => run_import_task(command, task_id, notifier.clone()).await,
            WaitMode::Background => {
                tokio::spawn(run_import_task(command, task_id, notifier.clone()));
            }
        }
        Ok(())
    }

    async fn refresh_linked_projects(
        &self,
        linked: &[PathBuf],
        notifier: &NotificationDispatcher,
    ) -> Result<(), TriggerError> {
        if self.registry.is_disabled() {
            warn!(
                "Auto-import is disabled, skipping refresh of {} linked projects",
                linked.len()
            );
            return Ok(());
        }

        for root in linked {
            self.import_project(ImportRequest::new(root), notifier).await?;
        }
        Ok(())
    }
}

/// Run one Gradle process to completion, reporting its lifecycle
async fn run_import_task(command: GradleCommand, task_id: TaskId, notifier: NotificationDispatcher) {
    notifier.started(&task_id);

    let mut process = Command::new(&command.program);
    process
        .args(&command.args)
        .current_dir(&command.working_dir)
        .envs(&command.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match process.spawn() {
        Ok(child) => child,
        Err(e) => {
            notifier.failure(&task_id, format!("Failed to spawn {:?}: {}", command.program, e));
            return;
        }
    };

    let finished = match command.timeout {
        Some(timeout) => {
            match tokio::time::timeout(timeout, stream_until_exit(&mut child, &task_id, &notifier))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    warn!("Import task {} timed out after {:?}", task_id, timeout);
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill Gradle process for {}: {}", task_id, e);
                    }
                    notifier.cancelled(&task_id);
                    return;
                }
            }
        }
        None => stream_until_exit(&mut child, &task_id, &notifier).await,
    };

    match finished {
        Ok(status) if status.success() => notifier.success(&task_id),
        Ok(status) => {
            let detail = match status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            notifier.failure(&task_id, detail);
        }
        Err(e) => notifier.failure(&task_id, format!("Failed to wait for Gradle: {}", e)),
    }
}

/// Forward output lines until both streams close, then wait for the exit status
async fn stream_until_exit(
    child: &mut Child,
    task_id: &TaskId,
    notifier: &NotificationDispatcher,
) -> std::io::Result<ExitStatus> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("Failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("Failed to capture stderr"))?;

    let mut stdout_lines = BufReader::new(stdout).lines();
    let mut stderr_lines = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_lines.next_line(), if stdout_open => match line {
                Ok(Some(text)) => notifier.output(task_id, text, OutputStream::Stdout),
                Ok(None) => stdout_open = false,
                Err(e) => {
                    debug!("Error reading stdout of {}: {}", task_id, e);
                    stdout_open = false;
                }
            },
            line = stderr_lines.next_line(), if stderr_open => match line {
                Ok(Some(text)) => notifier.output(task_id, text, OutputStream::Stderr),
                Ok(None) => stderr_open = false,
                Err(e) => {
                    debug!("Error reading stderr of {}: {}", task_id, e);
                    stderr_open = false;
                }
            },
        }
    }

    child.wait().await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::import::{LifecycleState, NotificationListener, StateAggregator, TaskNotification};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct OutputCollector {
        lines: Mutex<Vec<(OutputStream, String)>>,
    }

    impl NotificationListener for OutputCollector {
        fn on_notification(&self, _task_id: &TaskId, notification: &TaskNotification) {
            if let TaskNotification::Output { text, stream } = notification {
                self.lines.lock().unwrap().push((*stream, text.clone()));
            }
        }
    }

    fn write_wrapper(root: &Path, body: &str) {
        let wrapper = crate::env::gradle_wrapper_path(root);
        fs::write(&wrapper, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&wrapper, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn trigger_with(config: GradleConfig, auto_import_disabled: bool) -> GradleCliTrigger {
        GradleCliTrigger::new(config, Arc::new(AutoImportRegistry::new(auto_import_disabled)))
    }

    fn single_state(states: &StateAggregator) -> LifecycleState {
        let snapshot = states.snapshot();
        assert_eq!(snapshot.len(), 1);
        *snapshot.values().next().unwrap()
    }

    #[tokio::test]
    async fn test_successful_import_streams_output() {
        let temp_dir = TempDir::new().unwrap();
        write_wrapper(temp_dir.path(), "echo \"configuring $2\"\necho 'warning' >&2\nexit 0");

        let states = Arc::new(StateAggregator::new());
        let output = Arc::new(OutputCollector::default());
        let notifier = NotificationDispatcher::new()
            .with_listener(states.clone())
            .with_listener(output.clone());

        let trigger = trigger_with(GradleConfig::default(), true);
        trigger
            .import_project(ImportRequest::new(temp_dir.path()), &notifier)
            .await
            .unwrap();

        assert_eq!(single_state(&states), LifecycleState::Success);
        let lines = output.lines.lock().unwrap();
        assert!(lines.iter().any(|(stream, text)| {
            *stream == OutputStream::Stdout && text.contains("configuring")
        }));
        assert!(lines.contains(&(OutputStream::Stderr, "warning".to_string())));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let temp_dir = TempDir::new().unwrap();
        write_wrapper(temp_dir.path(), "exit 3");

        let states = Arc::new(StateAggregator::new());
        let notifier = NotificationDispatcher::new().with_listener(states.clone());

        trigger_with(GradleConfig::default(), true)
            .import_project(ImportRequest::new(temp_dir.path()), &notifier)
            .await
            .unwrap();

        assert_eq!(single_state(&states), LifecycleState::Failure);
    }

    #[tokio::test]
    async fn test_timeout_cancels_task() {
        let temp_dir = TempDir::new().unwrap();
        write_wrapper(temp_dir.path(), "sleep 5");

        let states = Arc::new(StateAggregator::new());
        let notifier = NotificationDispatcher::new().with_listener(states.clone());
        let config = GradleConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };

        trigger_with(config, true)
            .import_project(ImportRequest::new(temp_dir.path()), &notifier)
            .await
            .unwrap();

        assert_eq!(single_state(&states), LifecycleState::Cancelled);
    }

    #[tokio::test]
    async fn test_unspawnable_executable_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let states = Arc::new(StateAggregator::new());
        let notifier = NotificationDispatcher::new().with_listener(states.clone());
        let config = GradleConfig {
            executable: Some(temp_dir.path().join("no-such-gradle")),
            ..Default::default()
        };

        trigger_with(config, true)
            .import_project(ImportRequest::new(temp_dir.path()), &notifier)
            .await
            .unwrap();

        assert_eq!(single_state(&states), LifecycleState::Failure);
    }

    #[tokio::test]
    async fn test_refresh_skipped_while_auto_import_disabled() {
        let temp_dir = TempDir::new().unwrap();
        write_wrapper(temp_dir.path(), "exit 0");
        let linked = vec![temp_dir.path().to_path_buf()];

        let states = Arc::new(StateAggregator::new());
        let notifier = NotificationDispatcher::new().with_listener(states.clone());

        trigger_with(GradleConfig::default(), true)
            .refresh_linked_projects(&linked, &notifier)
            .await
            .unwrap();
        assert!(states.is_empty());

        trigger_with(GradleConfig::default(), false)
            .refresh_linked_projects(&linked, &notifier)
            .await
            .unwrap();
        assert_eq!(single_state(&states), LifecycleState::Success);
    }

    #[tokio::test]
    async fn test_background_import_returns_before_completion() {
        let temp_dir = TempDir::new().unwrap();
        write_wrapper(temp_dir.path(), "sleep 1");

        let states = Arc::new(StateAggregator::new());
        let notifier = NotificationDispatcher::new().with_listener(states.clone());

        trigger_with(GradleConfig::default(), true)
            .import_project(
                ImportRequest::new(temp_dir.path()).with_wait(WaitMode::Background),
                &notifier,
            )
            .await
            .unwrap();

        assert_ne!(
            states.snapshot().values().next().copied(),
            Some(LifecycleState::Success)
        );
    }
}
