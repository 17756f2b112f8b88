use std::path::PathBuf;
use std::time::Duration;

use sm10_transport::SerialSettings;

/// Time the controller needs after a command before it can answer.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

const LOG_FILE_NAME: &str = "SM10.log";

/// Where transaction log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No transaction log.
    #[default]
    None,
    /// Console (stdout) only.
    Console,
    /// Append-only log file only.
    File,
    /// Console and log file.
    Both,
}

impl Verbosity {
    /// Whether lines are printed to the console.
    pub fn console(self) -> bool {
        matches!(self, Verbosity::Console | Verbosity::Both)
    }

    /// Whether lines are appended to the log file.
    pub fn file(self) -> bool {
        matches!(self, Verbosity::File | Verbosity::Both)
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = u8;

    /// Numeric levels: 0 none, 1 console, 2 file, 3 both.
    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            0 => Ok(Verbosity::None),
            1 => Ok(Verbosity::Console),
            2 => Ok(Verbosity::File),
            3 => Ok(Verbosity::Both),
            other => Err(other),
        }
    }
}

/// Configuration for a driver instance.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Serial line settings.
    pub serial: SerialSettings,
    /// Wait between writing a command and reading its reply.
    pub settle: Duration,
    /// Transaction log destinations.
    pub verbosity: Verbosity,
    /// Log file, used when `verbosity` includes the file sink.
    pub log_path: PathBuf,
    /// Include hex traces of every frame sent and reply received.
    pub serial_debug: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            serial: SerialSettings::default(),
            settle: DEFAULT_SETTLE,
            verbosity: Verbosity::default(),
            log_path: default_log_path(),
            serial_debug: false,
        }
    }
}

/// `SM10.log` on the user's desktop, or in the working directory when no
/// home directory is known.
pub fn default_log_path() -> PathBuf {
    ["USERPROFILE", "HOME"]
        .iter()
        .find_map(|var| std::env::var_os(var).filter(|v| !v.is_empty()))
        .map(|home| PathBuf::from(home).join("Desktop").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}
