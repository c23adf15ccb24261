use crate::diagnostics::{DiagnosticListener, OutputLogConfig, OutputLogSink};
use crate::env;
use crate::import::error::ImportError;
use crate::import::notification::{LoggingListener, NotificationDispatcher};
use crate::import::outcome::OutcomeChecker;
use crate::import::ports::{ImportHintStore, ImportTrigger, LinkedProjectSettings};
use crate::import::registry::AutoImportRegistry;
use crate::import::state::StateAggregator;
use crate::import::strategy::{ImportContext, StrategySelector};
use crate::import::types::ImportReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for the project configurator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfiguratorConfig {
    /// Build script names checked in the base directory, in preference order
    #[serde(default = "default_build_script_names")]
    pub build_script_names: Vec<String>,
    /// Raw task output log, `None` to skip it
    #[serde(default)]
    pub output_log: Option<OutputLogConfig>,
}

fn default_build_script_names() -> Vec<String> {
    env::BUILD_SCRIPT_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            build_script_names: default_build_script_names(),
            output_log: None,
        }
    }
}

/// The host project an import session runs against
pub struct ImportProject<'a> {
    pub base_dir: &'a Path,
    pub hints: &'a dyn ImportHintStore,
    pub linked: &'a dyn LinkedProjectSettings,
}

/// Coordinates one import session per [`ProjectConfigurator::configure_project`] call
pub struct ProjectConfigurator {
    trigger: Arc<dyn ImportTrigger>,
    registry: Arc<AutoImportRegistry>,
    selector: StrategySelector,
    config: ConfiguratorConfig,
}

impl ProjectConfigurator {
    pub fn new(
        trigger: Arc<dyn ImportTrigger>,
        registry: Arc<AutoImportRegistry>,
        config: ConfiguratorConfig,
    ) -> Self {
        Self {
            trigger,
            registry,
            selector: StrategySelector::default(),
            config,
        }
    }

    pub fn with_selector(mut self, selector: StrategySelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    /// Import the project and fail if any triggered task did not succeed.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::MissingHintedBuildFile`] before any task is
    /// triggered when a hinted build file is missing,
    /// [`ImportError::Trigger`] when the integration cannot launch an import,
    /// and [`ImportError::ImportFailed`] listing every task that settled in a
    /// state other than `SUCCESS`.
    pub async fn configure_project(
        &self,
        project: &ImportProject<'_>,
    ) -> Result<ImportReport, ImportError> {
        let hint = project.hints.import_hint();
        if hint.skip {
            info!("Import hint requests skipping {:?}", project.base_dir);
            return Ok(ImportReport::skipped());
        }

        info!("Configuring project at {:?}", project.base_dir);

        let states = Arc::new(StateAggregator::new());
        let mut notifier = NotificationDispatcher::new()
            .with_listener(states.clone())
            .with_listener(Arc::new(LoggingListener));

        let diagnostics = self.open_diagnostics(project.base_dir);
        if let Some(listener) = &diagnostics {
            notifier.add_listener(listener.clone());
        }

        let ctx = ImportContext {
            base_dir: project.base_dir,
            hint: &hint,
            linked: project.linked,
            trigger: self.trigger.as_ref(),
            notifier: &notifier,
            registry: self.registry.as_ref(),
            build_script_names: &self.config.build_script_names,
        };
        let selected = self.selector.run(&ctx).await;

        if let Some(listener) = diagnostics
            && let Err(e) = listener.close()
        {
            warn!("Failed to close output log {:?}: {}", listener.sink().path(), e);
        }

        let strategy = selected?;
        let tasks = OutcomeChecker::check(&states.snapshot())?;

        info!(
            "Project at {:?} configured ({} tasks, strategy: {})",
            project.base_dir,
            tasks.len(),
            strategy.unwrap_or("none")
        );

        Ok(ImportReport {
            skipped: false,
            strategy: strategy.map(str::to_string),
            tasks,
        })
    }

    fn open_diagnostics(&self, base_dir: &Path) -> Option<Arc<DiagnosticListener>> {
        let config = self.config.output_log.as_ref().filter(|c| c.enabled)?;
        let config = OutputLogConfig {
            log_dir: resolve_against(base_dir, &config.log_dir),
            ..config.clone()
        };

        match OutputLogSink::open(&config) {
            Ok(sink) => Some(Arc::new(DiagnosticListener::new(sink))),
            Err(e) => {
                warn!(
                    "Output log {:?} unavailable, continuing without it: {}",
                    config.log_file_path(),
                    e
                );
                None
            }
        }
    }
}

fn resolve_against(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
