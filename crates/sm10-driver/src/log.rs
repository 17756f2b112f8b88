//! Human-readable transaction log.
//!
//! Lines are prefixed with a local timestamp, `[YYYY/MM/DD HH:MM:SS] `, and go
//! to the console, an append-only file, or both. Logging never fails a device
//! operation: a sink that cannot be opened or written is disabled.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use crate::config::Verbosity;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Console and file sinks for transaction log lines.
pub struct TransactionLog {
    console: Option<Box<dyn Write + Send>>,
    file: Option<LogFile>,
}

struct LogFile {
    path: PathBuf,
    file: File,
}

impl TransactionLog {
    /// Open the sinks selected by `verbosity`.
    ///
    /// If the log file cannot be opened or created, file logging is disabled
    /// and a diagnostic goes to the console sink (when enabled).
    pub fn open(verbosity: Verbosity, path: &Path) -> Self {
        Self::open_with_console(verbosity, path, std::io::stdout())
    }

    /// Like [`TransactionLog::open`], with `console` in place of stdout.
    pub fn open_with_console(
        verbosity: Verbosity,
        path: &Path,
        console: impl Write + Send + 'static,
    ) -> Self {
        let mut log = Self {
            console: verbosity
                .console()
                .then(|| Box::new(console) as Box<dyn Write + Send>),
            file: None,
        };

        if verbosity.file() {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    debug!(path = %path.display(), "transaction log file opened");
                    log.file = Some(LogFile {
                        path: path.to_path_buf(),
                        file,
                    });
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "unable to open log file, file logging disabled");
                    log.write("Unable to open or create log file");
                }
            }
        }

        log
    }

    /// A log with no sinks.
    pub fn disabled() -> Self {
        Self {
            console: None,
            file: None,
        }
    }

    /// A log writing to `writer` in place of stdout.
    pub fn with_console(writer: impl Write + Send + 'static) -> Self {
        Self {
            console: Some(Box::new(writer)),
            file: None,
        }
    }

    pub fn is_console_enabled(&self) -> bool {
        self.console.is_some()
    }

    pub fn is_file_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Path of the open log file, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    /// Write one timestamped line to every enabled sink.
    pub fn write(&mut self, msg: &str) {
        if self.console.is_none() && self.file.is_none() {
            return;
        }
        let line = timestamped(&Local::now(), msg);

        if let Some(console) = self.console.as_mut() {
            let _ = writeln!(console, "{line}");
            let _ = console.flush();
        }

        if let Some(log_file) = self.file.as_mut() {
            if let Err(err) = writeln!(log_file.file, "{line}") {
                warn!(path = %log_file.path.display(), %err, "log file write failed, file logging disabled");
                self.file = None;
            }
        }
    }
}

impl std::fmt::Debug for TransactionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionLog")
            .field("console", &self.console.is_some())
            .field("file", &self.file_path())
            .finish()
    }
}

/// Prefix `msg` with `[YYYY/MM/DD HH:MM:SS] `.
pub fn timestamped<Tz: TimeZone>(at: &DateTime<Tz>, msg: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {msg}", at.format(TIMESTAMP_FORMAT))
}
