//! Append-only log of raw task output.
//!
//! The sink is opened for one import session and closed when the session
//! ends. Every output line of every task is appended to the log file, which
//! is flushed whenever a task ends.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gradle_import::diagnostics::{DiagnosticListener, OutputLogConfig, OutputLogSink};
//! use gradle_import::import::{NotificationDispatcher, OutputStream, TaskId};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # fn example() -> std::io::Result<()> {
//! let config = OutputLogConfig {
//!     enabled: true,
//!     log_dir: PathBuf::from("/workspace/.gradle-import/logs"),
//!     file_name: "gradle-import.log".to_string(),
//! };
//!
//! let sink = OutputLogSink::open(&config)?;
//! let listener = Arc::new(DiagnosticListener::new(sink));
//! let dispatcher = NotificationDispatcher::new().with_listener(listener.clone());
//!
//! let task = TaskId::new("app");
//! dispatcher.started(&task);
//! dispatcher.output(&task, "BUILD SUCCESSFUL", OutputStream::Stdout);
//! dispatcher.success(&task);
//!
//! listener.close()?;
//! # Ok(())
//! # }
//! ```

use crate::env;
use crate::import::notification::{NotificationListener, OutputStream, TaskNotification};
use crate::import::types::TaskId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Configuration for the task output log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputLogConfig {
    /// Enable/disable the output log file
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Directory holding the log file
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_enabled() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    env::default_logs_dir_path()
}

fn default_file_name() -> String {
    env::OUTPUT_LOG_FILE_NAME.to_string()
}

impl Default for OutputLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            log_dir: default_log_dir(),
            file_name: default_file_name(),
        }
    }
}

impl OutputLogConfig {
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }
}

/// Append-only file receiving raw task output lines.
#[derive(Debug)]
pub struct OutputLogSink {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl OutputLogSink {
    /// Open (or create) the log file in append mode and write a session header.
    pub fn open(config: &OutputLogConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.log_dir)?;
        let path = config.log_file_path();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "{}\n[{}] Import session started",
            "=".repeat(80),
            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC")
        )?;

        Ok(Self {
            path,
            writer: Mutex::new(Some(writer)),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one output line. Lines written after `close` are dropped.
    pub fn append(&self, task_id: &TaskId, stream: OutputStream, text: &str) -> io::Result<()> {
        let mut guard = self.lock_writer()?;
        let Some(writer) = guard.as_mut() else {
            return Ok(());
        };
        writeln!(
            writer,
            "[{}] [{}] {}: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            task_id,
            stream,
            text.trim_end()
        )
    }

    pub fn flush(&self) -> io::Result<()> {
        match self.lock_writer()?.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Flush and release the file. Idempotent.
    pub fn close(&self) -> io::Result<()> {
        let writer = self.lock_writer()?.take();
        if let Some(mut writer) = writer {
            writeln!(
                writer,
                "[{}] Import session finished",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC")
            )?;
            writer.flush()?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.lock_writer().map(|w| w.is_none()).unwrap_or(true)
    }

    fn lock_writer(&self) -> io::Result<std::sync::MutexGuard<'_, Option<BufWriter<File>>>> {
        self.writer
            .lock()
            .map_err(|_| io::Error::other("output log writer lock poisoned"))
    }
}

/// Listener streaming task output to an [`OutputLogSink`].
///
/// The debug log copy of each line comes from
/// [`crate::import::LoggingListener`]. Does not record lifecycle state; write
/// failures are logged and dropped.
#[derive(Debug)]
pub struct DiagnosticListener {
    sink: OutputLogSink,
}

impl DiagnosticListener {
    pub fn new(sink: OutputLogSink) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &OutputLogSink {
        &self.sink
    }

    pub fn close(&self) -> io::Result<()> {
        self.sink.close()
    }
}

impl NotificationListener for DiagnosticListener {
    fn on_notification(&self, task_id: &TaskId, notification: &TaskNotification) {
        match notification {
            TaskNotification::Output { text, stream } => {
                if let Err(e) = self.sink.append(task_id, *stream, text) {
                    warn!("Failed to write task output to {:?}: {}", self.sink.path(), e);
                }
            }
            n if n.is_task_end() => {
                if let Err(e) = self.sink.flush() {
                    warn!("Failed to flush output log {:?}: {}", self.sink.path(), e);
                }
            }
            _ => {}
        }
    }
}
