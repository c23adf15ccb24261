//! # Gradle Import
//!
//! Headless import of Gradle projects. One import session picks exactly one
//! import strategy, lets the build-tool integration run the resulting import
//! tasks, aggregates their lifecycle notifications and fails if any task did
//! not succeed.
//!
//! ## Architecture Overview
//!
//! - **[`import`]**: Strategy selection, notification aggregation and outcome checking
//! - **[`gradle`]**: Gradle command line integration implementing the import trigger
//! - **[`diagnostics`]**: Append-only log of raw task output
//! - **[`settings`]**: File-backed import hint and linked project settings
//! - **[`cli`]**: Argument parsing and configuration discovery
//!
//! ## Session Flow
//!
//! ```text
//! ImportHint / linked settings / base dir
//!                 ↓
//!         StrategySelector  (hinted → linked-refresh → root-discovery)
//!                 ↓
//!           ImportTrigger  ──notifications──▶  StateAggregator
//!                 ↓                                  ↓
//!                 └──────────▶ OutcomeChecker ◀──────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gradle_import::gradle::{GradleCliTrigger, GradleConfig};
//! use gradle_import::import::{
//!     AutoImportRegistry, ConfiguratorConfig, ImportHint, ImportProject, ProjectConfigurator,
//! };
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(AutoImportRegistry::default());
//!     let trigger = Arc::new(GradleCliTrigger::new(GradleConfig::default(), registry.clone()));
//!     let configurator = ProjectConfigurator::new(trigger, registry, ConfiguratorConfig::default());
//!
//!     let hint = ImportHint::default();
//!     let linked: Vec<PathBuf> = Vec::new();
//!     let project = ImportProject {
//!         base_dir: Path::new("/work/app"),
//!         hints: &hint,
//!         linked: &linked,
//!     };
//!
//!     let report = configurator.configure_project(&project).await?;
//!     println!("Imported {} tasks", report.task_count());
//!     Ok(())
//! }
//! ```

/// Import session orchestration.
///
/// Strategy selection, task notification aggregation, the auto-import switch
/// and the final outcome check.
pub mod import;

/// Gradle command line integration.
///
/// Locates the Gradle wrapper or executable and reports each import process
/// as a task through notifications.
pub mod gradle;

/// Diagnostic capture of raw task output.
pub mod diagnostics;

/// File-backed project settings.
pub mod settings;

/// Environment constants and path utilities.
pub mod env;

// CLI module for command-line interface
pub mod cli;

pub use import::{
    ImportError, ImportHint, ImportReport, LifecycleState, ProjectConfigurator, TaskId,
};
