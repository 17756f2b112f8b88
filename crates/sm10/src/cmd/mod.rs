use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use sm10_driver::{connect_with_config, default_log_path, DriverConfig, Sm10};
use sm10_transport::SerialSettings;
use tracing::debug;

use crate::exit::{transport_error, CliError, CliResult, TRANSPORT_ERROR, USAGE};
use crate::logging::TransactionLogArg;
use crate::output::OutputFormat;

pub mod motion;
pub mod ports;
pub mod position;
pub mod status;
pub mod store;
pub mod switch;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read the position of an axis.
    Position(AxisArgs),
    /// Move an axis to (or by) a position in micrometers.
    Move(MoveArgs),
    /// Read the status byte of an axis.
    Status(AxisArgs),
    /// Switch an axis on or off.
    Switch(SwitchArgs),
    /// Store the current axis position in a slot (1-5).
    Store(SlotArgs),
    /// Move an axis to a stored position slot (1-5).
    Recall(SlotArgs),
    /// List available serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Position(args) => position::run(args, conn, format),
        Command::Move(args) => motion::run(args, conn, format),
        Command::Status(args) => status::run(args, conn, format),
        Command::Switch(args) => switch::run(args, conn, format),
        Command::Store(args) => store::run_store(args, conn, format),
        Command::Recall(args) => store::run_recall(args, conn, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Connection and transaction log settings shared by device commands.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Serial port the controller is attached to.
    #[arg(long, short = 'p', env = "SM10_PORT", global = true)]
    pub port: Option<String>,
    /// Baud rate.
    #[arg(long, env = "SM10_BAUD", default_value_t = 115_200, global = true)]
    pub baud: u32,
    /// Read timeout for each reply (e.g. 100ms, 1s).
    #[arg(long, default_value = "100ms", global = true)]
    pub timeout: String,
    /// Wait between sending a command and reading its reply.
    #[arg(long, default_value = "100ms", global = true)]
    pub settle: String,
    /// Transaction log destinations.
    #[arg(long, value_enum, default_value = "none", global = true)]
    pub transaction_log: TransactionLogArg,
    /// Transaction log file (default: SM10.log on the desktop).
    #[arg(long, env = "SM10_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,
    /// Include hex traces of every frame in the transaction log.
    #[arg(long, global = true)]
    pub serial_debug: bool,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> CliResult<DriverConfig> {
        let mut serial = match &self.port {
            Some(port) => SerialSettings::for_port(port.as_str()),
            None => SerialSettings::default(),
        };
        serial.baud_rate = self.baud;
        serial.timeout = parse_duration(&self.timeout)?;

        Ok(DriverConfig {
            serial,
            settle: parse_duration(&self.settle)?,
            verbosity: self.transaction_log.as_verbosity(),
            log_path: self.log_file.clone().unwrap_or_else(default_log_path),
            serial_debug: self.serial_debug,
        })
    }
}

/// Open the controller, failing when the port cannot be opened.
pub fn open(conn: &ConnectionArgs) -> CliResult<Sm10> {
    let config = conn.to_config()?;
    debug!(port = %config.serial.port, "opening controller");
    let mut sm10 = connect_with_config(&config);
    if sm10.is_connected() {
        return Ok(sm10);
    }
    let context = format!("cannot open {}", sm10.port());
    match sm10.take_open_error() {
        Some(err) => Err(transport_error(&context, err)),
        None => Err(CliError::new(TRANSPORT_ERROR, context)),
    }
}

#[derive(Args, Debug)]
pub struct AxisArgs {
    /// Axis number.
    pub axis: u8,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Axis number.
    pub axis: u8,
    /// Target position (or distance with --relative) in micrometers.
    #[arg(allow_negative_numbers = true)]
    pub position: f32,
    /// Move by a distance instead of to an absolute position.
    #[arg(long)]
    pub relative: bool,
    /// Use the fast speed profile.
    #[arg(long)]
    pub fast: bool,
    /// Negate the position (axis mounted reversed).
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwitchState {
    On,
    Off,
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Axis number.
    pub axis: u8,
    /// New power state.
    #[arg(value_enum)]
    pub state: SwitchState,
}

#[derive(Args, Debug)]
pub struct SlotArgs {
    /// Axis number.
    pub axis: u8,
    /// Stored position slot (1-5).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
    pub slot: u8,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm10_driver::Verbosity;

    fn conn() -> ConnectionArgs {
        ConnectionArgs {
            port: Some("/dev/ttyUSB3".to_string()),
            baud: 115_200,
            timeout: "250ms".to_string(),
            settle: "0".to_string(),
            transaction_log: TransactionLogArg::Both,
            log_file: Some(PathBuf::from("/tmp/sm10-test.log")),
            serial_debug: true,
        }
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("100").unwrap(), Duration::from_millis(100));
        assert_eq!(parse_duration("0ms").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("-5ms").is_err());
    }

    #[test]
    fn connection_args_build_driver_config() {
        let config = conn().to_config().expect("config should build");
        assert_eq!(config.serial.port, "/dev/ttyUSB3");
        assert_eq!(config.serial.timeout, Duration::from_millis(250));
        assert_eq!(config.settle, Duration::ZERO);
        assert_eq!(config.verbosity, Verbosity::Both);
        assert_eq!(config.log_path, PathBuf::from("/tmp/sm10-test.log"));
        assert!(config.serial_debug);
    }

    #[test]
    fn open_reports_missing_port() {
        let args = ConnectionArgs {
            port: Some(format!("/nonexistent/sm10-cli-{}", std::process::id())),
            transaction_log: TransactionLogArg::None,
            ..conn()
        };
        let err = open(&args).expect_err("missing port should fail");
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.starts_with("cannot open /nonexistent/sm10-cli-"));
    }
}
