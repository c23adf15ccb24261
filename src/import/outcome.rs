use crate::import::error::{ImportError, TaskFailure};
use crate::import::state::StateMap;
use crate::import::types::TaskReport;
use tracing::{info, warn};

/// Turns the settled state map into a single pass/fail decision
pub struct OutcomeChecker;

impl OutcomeChecker {
    /// Fail if any task is not `SUCCESS`, reporting every such task.
    ///
    /// An empty map passes. Tasks are reported in project-id order so the
    /// message does not depend on map iteration order.
    pub fn check(states: &StateMap) -> Result<Vec<TaskReport>, ImportError> {
        let mut tasks: Vec<TaskReport> = states
            .iter()
            .map(|(task_id, state)| TaskReport {
                task_id: task_id.id,
                project_id: task_id.project_id.clone(),
                state: *state,
            })
            .collect();
        tasks.sort_by(|a, b| {
            a.project_id
                .cmp(&b.project_id)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });

        let failures: Vec<TaskFailure> = tasks
            .iter()
            .filter(|task| !task.state.is_success())
            .map(|task| TaskFailure {
                project_id: task.project_id.clone(),
                state: task.state,
            })
            .collect();

        if !failures.is_empty() {
            warn!(
                "{} of {} import tasks did not succeed",
                failures.len(),
                tasks.len()
            );
            return Err(ImportError::ImportFailed(failures));
        }

        info!("All {} import tasks succeeded", tasks.len());
        Ok(tasks)
    }
}
