//! # Gradle command line integration
//!
//! Implements [`crate::import::ImportTrigger`] on top of the Gradle CLI so the
//! import coordinator can run outside an IDE.
//!
//! ## Executable resolution
//!
//! 1. `gradlew` in the import root (when `prefer_wrapper` is set)
//! 2. `executable` from [`GradleConfig`]
//! 3. `gradle` on `PATH`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gradle_import::gradle::{GradleCliTrigger, GradleConfig};
//! use gradle_import::import::{AutoImportRegistry, ImportRequest, ImportTrigger, NotificationDispatcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let trigger = GradleCliTrigger::new(GradleConfig::default(), Arc::new(AutoImportRegistry::default()));
//!     let notifier = NotificationDispatcher::new();
//!
//!     trigger.import_project(ImportRequest::new("/work/app"), &notifier).await?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod trigger;

pub use command::GradleCommand;
pub use config::GradleConfig;
pub use trigger::GradleCliTrigger;
