mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, ConnectionArgs};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "sm10", version, about = "SM-10 micromanipulator controller CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &cli.connection, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::SwitchState;
    use crate::logging::TransactionLogArg;

    #[test]
    fn parses_move_with_negative_position() {
        let cli = Cli::try_parse_from([
            "sm10",
            "move",
            "15",
            "-100.5",
            "--relative",
            "--fast",
            "--port",
            "/dev/ttyUSB1",
        ])
        .expect("move args should parse");

        match cli.command {
            Command::Move(args) => {
                assert_eq!(args.axis, 15);
                assert_eq!(args.position, -100.5);
                assert!(args.relative && args.fast && !args.reverse);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.connection.port.as_deref(), Some("/dev/ttyUSB1"));
    }

    #[test]
    fn parses_switch_state() {
        let cli = Cli::try_parse_from(["sm10", "switch", "2", "off"])
            .expect("switch args should parse");
        assert!(matches!(
            cli.command,
            Command::Switch(ref args) if args.axis == 2 && args.state == SwitchState::Off
        ));
    }

    #[test]
    fn rejects_slot_out_of_range() {
        let err = Cli::try_parse_from(["sm10", "store", "1", "6"])
            .expect_err("slot 6 should be rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_connection_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "sm10",
            "position",
            "3",
            "--transaction-log",
            "both",
            "--serial-debug",
            "--settle",
            "250ms",
        ])
        .expect("position args should parse");

        assert!(matches!(cli.command, Command::Position(ref args) if args.axis == 3));
        assert_eq!(cli.connection.transaction_log, TransactionLogArg::Both);
        assert!(cli.connection.serial_debug);
        assert_eq!(cli.connection.settle, "250ms");
    }
}
