/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The declared parameter count disagrees with the parameter bytes supplied.
    #[error("parameter length mismatch: declared {declared}, got {actual} byte(s)")]
    LengthMismatch { declared: usize, actual: usize },

    /// The parameter block does not fit the 1-byte count field.
    #[error("too many parameter bytes ({0}, max 255)")]
    ParameterOverflow(usize),

    /// Fewer reply bytes arrived than the command defines.
    #[error("short reply: expected {expected} byte(s), got {actual}")]
    ShortReply { expected: usize, actual: usize },

    /// An I/O error occurred while writing a frame or reading a reply.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream accepted zero bytes while a frame was being written.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
