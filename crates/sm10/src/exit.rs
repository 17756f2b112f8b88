use std::fmt;
use std::io;

use sm10_driver::DriverError;
use sm10_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound | io::ErrorKind::BrokenPipe => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn driver_error(context: &str, err: DriverError) -> CliError {
    match err {
        DriverError::ConnectionUnavailable => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
        DriverError::Transport(err) => transport_error(context, err),
        DriverError::TransportIo(err) => io_error(context, err),
        DriverError::ShortReply { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        DriverError::InvalidStoredPosition(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        DriverError::LengthMismatch { .. } | DriverError::ParameterOverflow(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reply_maps_to_timeout() {
        let err = driver_error(
            "position failed",
            DriverError::ShortReply {
                expected: 10,
                actual: 3,
            },
        );
        assert_eq!(err.code, TIMEOUT);
        assert!(err.message.starts_with("position failed: short reply"));
    }

    #[test]
    fn unavailable_connection_maps_to_transport_error() {
        let err = driver_error("status failed", DriverError::ConnectionUnavailable);
        assert_eq!(err.code, TRANSPORT_ERROR);
    }

    #[test]
    fn invalid_slot_maps_to_usage() {
        let err = driver_error("store failed", DriverError::InvalidStoredPosition(9));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn permission_denied_io() {
        let err = io_error("open", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
