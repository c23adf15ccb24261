//! CLI-specific functionality for the Gradle import coordinator
//!
//! This module contains all CLI-related code including argument parsing
//! and configuration discovery.

pub mod args;
pub mod config;

pub use args::{Args, ExecutionMode, ImportOptions};
pub use config::{ConfigDiscovery, ConfigError, ImportToolConfig};
