use sm10_frame::FrameError;
use sm10_transport::TransportError;

/// Errors that can occur in driver transactions.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The driver has no open transport.
    #[error("SM10 connection unavailable")]
    ConnectionUnavailable,

    /// The declared parameter count disagrees with the parameter bytes supplied.
    #[error("parameter length mismatch: declared {declared}, got {actual} byte(s)")]
    LengthMismatch { declared: usize, actual: usize },

    /// The parameter block does not fit in one frame.
    #[error("too many parameter bytes ({0}, max 255)")]
    ParameterOverflow(usize),

    /// The controller answered with fewer bytes than the command defines.
    #[error("short reply: expected {expected} byte(s), got {actual}")]
    ShortReply { expected: usize, actual: usize },

    /// Writing the frame or reading the reply failed.
    #[error("transport I/O error: {0}")]
    TransportIo(#[from] std::io::Error),

    /// Opening or configuring the transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Stored position slots are numbered 1 to 5.
    #[error("invalid stored position {0} (expected 1-5)")]
    InvalidStoredPosition(u8),
}

impl From<FrameError> for DriverError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::LengthMismatch { declared, actual } => {
                DriverError::LengthMismatch { declared, actual }
            }
            FrameError::ParameterOverflow(len) => DriverError::ParameterOverflow(len),
            FrameError::ShortReply { expected, actual } => {
                DriverError::ShortReply { expected, actual }
            }
            FrameError::Io(err) => DriverError::TransportIo(err),
            FrameError::ConnectionClosed => DriverError::TransportIo(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "serial port accepted no bytes",
            )),
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
