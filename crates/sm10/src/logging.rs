use clap::ValueEnum;
use sm10_driver::Verbosity;
use tracing::level_filters::LevelFilter;

/// Format of diagnostics written to stderr.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Minimum level of diagnostics written to stderr.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl LogLevel {
    /// Frame and transport traces come from several crates; name them.
    fn shows_target(self) -> bool {
        matches!(self, LogLevel::Debug | LogLevel::Trace)
    }
}

/// Transaction log destinations selectable on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransactionLogArg {
    None,
    Console,
    File,
    Both,
}

impl TransactionLogArg {
    pub fn as_verbosity(self) -> Verbosity {
        match self {
            TransactionLogArg::None => Verbosity::None,
            TransactionLogArg::Console => Verbosity::Console,
            TransactionLogArg::File => Verbosity::File,
            TransactionLogArg::Both => Verbosity::Both,
        }
    }
}

/// Install the stderr diagnostics subscriber. A second call is a no-op.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(level.shows_target());

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn targets_only_at_debug_and_below() {
        assert!(!LogLevel::Info.shows_target());
        assert!(LogLevel::Debug.shows_target());
    }

    #[test]
    fn transaction_log_arg_maps_to_verbosity() {
        assert_eq!(TransactionLogArg::None.as_verbosity(), Verbosity::None);
        assert_eq!(TransactionLogArg::Both.as_verbosity(), Verbosity::Both);
    }
}
