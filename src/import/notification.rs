use crate::import::types::{LifecycleState, TaskId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output channel a task line was written to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Lifecycle event reported by the build-tool integration for one task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskNotification {
    Started,
    Output { text: String, stream: OutputStream },
    Success,
    Failure { detail: String },
    Cancelled,
}

impl TaskNotification {
    pub fn output(text: impl Into<String>, stream: OutputStream) -> Self {
        Self::Output {
            text: text.into(),
            stream,
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self::Failure {
            detail: detail.into(),
        }
    }

    /// State recorded for this event, `None` for output lines
    pub fn lifecycle_state(&self) -> Option<LifecycleState> {
        match self {
            Self::Started => Some(LifecycleState::Started),
            Self::Output { .. } => None,
            Self::Success => Some(LifecycleState::Success),
            Self::Failure { .. } => Some(LifecycleState::Failure),
            Self::Cancelled => Some(LifecycleState::Cancelled),
        }
    }

    /// Whether this event ends the task
    pub fn is_task_end(&self) -> bool {
        matches!(self, Self::Success | Self::Failure { .. } | Self::Cancelled)
    }
}

/// Receiver of task notifications.
///
/// Invoked on whichever thread the integration reports from, possibly
/// concurrently for different tasks. Implementations must not block.
pub trait NotificationListener: Send + Sync {
    fn on_notification(&self, task_id: &TaskId, notification: &TaskNotification);
}

/// Fan-out of task notifications to every registered listener
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    listeners: Vec<Arc<dyn NotificationListener>>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(mut self, listener: Arc<dyn NotificationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn NotificationListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver one notification to all listeners in registration order
    pub fn dispatch(&self, task_id: &TaskId, notification: TaskNotification) {
        for listener in &self.listeners {
            listener.on_notification(task_id, &notification);
        }
    }

    pub fn started(&self, task_id: &TaskId) {
        self.dispatch(task_id, TaskNotification::Started);
    }

    pub fn output(&self, task_id: &TaskId, text: impl Into<String>, stream: OutputStream) {
        self.dispatch(task_id, TaskNotification::output(text, stream));
    }

    pub fn success(&self, task_id: &TaskId) {
        self.dispatch(task_id, TaskNotification::Success);
    }

    pub fn failure(&self, task_id: &TaskId, detail: impl Into<String>) {
        self.dispatch(task_id, TaskNotification::failure(detail));
    }

    pub fn cancelled(&self, task_id: &TaskId) {
        self.dispatch(task_id, TaskNotification::Cancelled);
    }
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that mirrors every notification into the tracing log
pub struct LoggingListener;

impl NotificationListener for LoggingListener {
    fn on_notification(&self, task_id: &TaskId, notification: &TaskNotification) {
        match notification {
            TaskNotification::Started => {
                info!("Import task started: {}", task_id);
            }
            TaskNotification::Output { text, stream } => {
                debug!("[{}] {}: {}", task_id, stream, text.trim_end());
            }
            TaskNotification::Success => {
                info!("Import task succeeded: {}", task_id);
            }
            TaskNotification::Failure { detail } => {
                warn!("Import task failed: {} - {}", task_id, detail);
            }
            TaskNotification::Cancelled => {
                warn!("Import task cancelled: {}", task_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<(TaskId, TaskNotification)>>,
    }

    impl NotificationListener for RecordingListener {
        fn on_notification(&self, task_id: &TaskId, notification: &TaskNotification) {
            self.seen
                .lock()
                .unwrap()
                .push((task_id.clone(), notification.clone()));
        }
    }

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let dispatcher = NotificationDispatcher::new()
            .with_listener(first.clone())
            .with_listener(second.clone());

        let id = TaskId::new("app");
        dispatcher.started(&id);
        dispatcher.output(&id, "BUILD SUCCESSFUL", OutputStream::Stdout);
        dispatcher.success(&id);

        assert_eq!(dispatcher.listener_count(), 2);
        for listener in [first, second] {
            let seen = listener.seen.lock().unwrap();
            assert_eq!(seen.len(), 3);
            assert_eq!(seen[0].1, TaskNotification::Started);
            assert_eq!(seen[2].1, TaskNotification::Success);
        }
    }

    #[test]
    fn test_notification_states() {
        assert_eq!(
            TaskNotification::Started.lifecycle_state(),
            Some(LifecycleState::Started)
        );
        assert_eq!(
            TaskNotification::output("x", OutputStream::Stderr).lifecycle_state(),
            None
        );
        assert_eq!(
            TaskNotification::failure("boom").lifecycle_state(),
            Some(LifecycleState::Failure)
        );
        assert_eq!(
            TaskNotification::Cancelled.lifecycle_state(),
            Some(LifecycleState::Cancelled)
        );

        assert!(!TaskNotification::Started.is_task_end());
        assert!(TaskNotification::Success.is_task_end());
        assert!(TaskNotification::Cancelled.is_task_end());
    }
}
