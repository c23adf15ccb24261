//! The three mutually exclusive ways a session can import a project.
//!
//! [`StrategySelector`] tries them in a fixed order and stops at the first
//! one that reports [`StrategyOutcome::Handled`].

use crate::import::error::ImportError;
use crate::import::notification::NotificationDispatcher;
use crate::import::ports::{ImportTrigger, LinkedProjectSettings};
use crate::import::registry::AutoImportRegistry;
use crate::import::types::{ImportHint, ImportRequest, StrategyOutcome};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything a strategy may consult or drive during one session
pub struct ImportContext<'a> {
    pub base_dir: &'a Path,
    pub hint: &'a ImportHint,
    pub linked: &'a dyn LinkedProjectSettings,
    pub trigger: &'a dyn ImportTrigger,
    pub notifier: &'a NotificationDispatcher,
    pub registry: &'a AutoImportRegistry,
    pub build_script_names: &'a [String],
}

/// Common interface for import strategies
#[async_trait]
pub trait ImportStrategy: Send + Sync {
    /// Run the import if this strategy applies to the context.
    ///
    /// # Errors
    ///
    /// Errors abort the whole session; no later strategy is attempted.
    async fn try_import(&self, ctx: &ImportContext<'_>) -> Result<StrategyOutcome, ImportError>;

    /// Name of this strategy for logging and reports
    fn name(&self) -> &'static str;
}

/// Imports the projects listed in the import hint.
///
/// A hinted path is either a build file or a project directory. Every hinted
/// path must exist; the first missing one aborts the session before any task
/// is triggered.
pub struct HintedImport;

impl HintedImport {
    fn resolve_hinted_paths(base_dir: &Path, hint: &ImportHint) -> Result<Vec<PathBuf>, ImportError> {
        let mut paths = Vec::with_capacity(hint.projects_to_import.len());
        for relative in &hint.projects_to_import {
            let path = base_dir.join(relative);
            if !path.exists() {
                return Err(ImportError::MissingHintedBuildFile { path });
            }
            paths.push(path);
        }
        Ok(paths)
    }

    fn request_for(path: PathBuf) -> ImportRequest {
        if path.is_dir() {
            ImportRequest::new(path)
        } else {
            ImportRequest::for_build_file(path)
        }
    }
}

#[async_trait]
impl ImportStrategy for HintedImport {
    async fn try_import(&self, ctx: &ImportContext<'_>) -> Result<StrategyOutcome, ImportError> {
        if !ctx.hint.has_projects() {
            return Ok(StrategyOutcome::NotApplicable);
        }

        let paths = Self::resolve_hinted_paths(ctx.base_dir, ctx.hint)?;
        info!("Importing {} hinted projects", paths.len());

        for path in paths {
            debug!("Triggering import of hinted path {:?}", path);
            ctx.trigger
                .import_project(Self::request_for(path), ctx.notifier)
                .await?;
        }

        Ok(StrategyOutcome::Handled)
    }

    fn name(&self) -> &'static str {
        "hinted"
    }
}

/// Refreshes projects that are already linked to the host project.
///
/// Auto-import stays enabled for the duration of the refresh and is restored
/// afterwards, whatever the refresh returns.
pub struct LinkedRefreshImport;

#[async_trait]
impl ImportStrategy for LinkedRefreshImport {
    async fn try_import(&self, ctx: &ImportContext<'_>) -> Result<StrategyOutcome, ImportError> {
        if !ctx.linked.has_linked_projects() {
            return Ok(StrategyOutcome::NotApplicable);
        }

        let linked = ctx.linked.linked_projects();
        info!("Refreshing {} linked projects", linked.len());

        let _auto_import = ctx.registry.enable_scoped();
        ctx.trigger
            .refresh_linked_projects(&linked, ctx.notifier)
            .await?;

        Ok(StrategyOutcome::Handled)
    }

    fn name(&self) -> &'static str {
        "linked-refresh"
    }
}

/// Imports the base directory when it holds a recognised build script.
///
/// Finding nothing is not an error: the session simply has nothing to do.
pub struct RootDiscoveryImport;

impl RootDiscoveryImport {
    /// First existing build script in preference order
    pub fn find_build_script(base_dir: &Path, names: &[String]) -> Option<PathBuf> {
        names
            .iter()
            .map(|name| base_dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

#[async_trait]
impl ImportStrategy for RootDiscoveryImport {
    async fn try_import(&self, ctx: &ImportContext<'_>) -> Result<StrategyOutcome, ImportError> {
        let Some(build_script) = Self::find_build_script(ctx.base_dir, ctx.build_script_names)
        else {
            info!("No build script found in {:?}, nothing to import", ctx.base_dir);
            return Ok(StrategyOutcome::NotApplicable);
        };

        info!("Discovered build script {:?}", build_script);
        ctx.trigger
            .import_project(
                ImportRequest::with_build_file(ctx.base_dir, build_script),
                ctx.notifier,
            )
            .await?;

        Ok(StrategyOutcome::Handled)
    }

    fn name(&self) -> &'static str {
        "root-discovery"
    }
}

/// Runs strategies in order until one handles the session
pub struct StrategySelector {
    strategies: Vec<Box<dyn ImportStrategy>>,
}

impl StrategySelector {
    pub fn new(strategies: Vec<Box<dyn ImportStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Name of the strategy that handled the session, `None` if none did
    pub async fn run(&self, ctx: &ImportContext<'_>) -> Result<Option<&'static str>, ImportError> {
        for strategy in &self.strategies {
            debug!("Trying import strategy '{}'", strategy.name());
            if strategy.try_import(ctx).await?.is_handled() {
                info!("Import handled by strategy '{}'", strategy.name());
                return Ok(Some(strategy.name()));
            }
        }
        Ok(None)
    }
}

impl Default for StrategySelector {
    /// Hinted import, then linked refresh, then root discovery
    fn default() -> Self {
        Self::new(vec![
            Box::new(HintedImport),
            Box::new(LinkedRefreshImport),
            Box::new(RootDiscoveryImport),
        ])
    }
}
