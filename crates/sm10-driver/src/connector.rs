use sm10_transport::{SerialSettings, SerialTransport};

use crate::config::DriverConfig;
use crate::driver::Sm10;
use crate::log::TransactionLog;

/// Open a driver on `port` with default settings.
pub fn connect(port: impl Into<String>) -> Sm10 {
    connect_with_config(&DriverConfig {
        serial: SerialSettings::for_port(port),
        ..DriverConfig::default()
    })
}

/// Open a driver with explicit configuration.
///
/// The log sinks are opened first, then the serial port. Neither failure is
/// fatal: a log file that cannot be opened disables file logging, and a port
/// that cannot be opened yields a disconnected driver (see
/// [`Sm10::is_connected`] and [`Sm10::open_error`]). Each resource is owned by
/// its own value, so whatever was acquired is released when the driver drops.
pub fn connect_with_config(config: &DriverConfig) -> Sm10 {
    let log = TransactionLog::open(config.verbosity, &config.log_path);
    let transport = SerialTransport::open(&config.serial);
    Sm10::from_parts(transport, log, config)
}
