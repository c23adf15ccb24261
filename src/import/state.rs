use crate::import::notification::{NotificationListener, TaskNotification};
use crate::import::types::{LifecycleState, TaskId};
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::debug;

/// Snapshot of the task state map taken after all triggered tasks settled
pub type StateMap = HashMap<TaskId, LifecycleState>;

/// Concurrent mapping from task identifier to its last known lifecycle state.
///
/// Written by notifier threads, read by the session once triggering is done.
/// One aggregator lives for exactly one import session.
#[derive(Debug, Default)]
pub struct StateAggregator {
    states: DashMap<TaskId, LifecycleState>,
}

impl StateAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(&self, task_id: &TaskId) {
        self.record(task_id, LifecycleState::Started);
    }

    pub fn on_success(&self, task_id: &TaskId) {
        self.record(task_id, LifecycleState::Success);
    }

    pub fn on_failure(&self, task_id: &TaskId, detail: &str) {
        debug!("Recording failure for {}: {}", task_id, detail);
        self.record(task_id, LifecycleState::Failure);
    }

    pub fn on_cancel(&self, task_id: &TaskId) {
        self.record(task_id, LifecycleState::Cancelled);
    }

    /// Single upsert, last write wins
    fn record(&self, task_id: &TaskId, state: LifecycleState) {
        self.states.insert(task_id.clone(), state);
    }

    pub fn state_of(&self, task_id: &TaskId) -> Option<LifecycleState> {
        self.states.get(task_id).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn snapshot(&self) -> StateMap {
        self.states
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl NotificationListener for StateAggregator {
    fn on_notification(&self, task_id: &TaskId, notification: &TaskNotification) {
        match notification {
            TaskNotification::Started => self.on_start(task_id),
            TaskNotification::Success => self.on_success(task_id),
            TaskNotification::Failure { detail } => self.on_failure(task_id, detail),
            TaskNotification::Cancelled => self.on_cancel(task_id),
            TaskNotification::Output { .. } => {}
        }
    }
}
