//! Diagnostic output capture for import tasks.
//!
//! Raw task output is not part of the import outcome; it is kept in an
//! append-only log for troubleshooting failed imports.

pub mod output_log;

pub use output_log::{DiagnosticListener, OutputLogConfig, OutputLogSink};
