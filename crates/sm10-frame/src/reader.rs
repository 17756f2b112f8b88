use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::codec::{decode_byte_field, decode_float_field};
use crate::error::{FrameError, Result};

/// A complete fixed-length reply from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    bytes: Bytes,
}

impl Reply {
    /// Wrap raw reply bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Raw reply bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the float field at `offset`.
    pub fn float_at(&self, offset: usize) -> Result<f32> {
        decode_float_field(&self.bytes, offset)
    }

    /// Decode the byte at `offset`.
    pub fn byte_at(&self, offset: usize) -> Result<u8> {
        decode_byte_field(&self.bytes, offset)
    }
}

/// Read exactly `expected` reply bytes (blocking).
///
/// The read window ends when the stream reports EOF or its read timeout
/// elapses (`TimedOut` / `WouldBlock`). Fewer bytes than `expected` by then is
/// `FrameError::ShortReply`; the partial bytes are discarded.
pub fn read_reply<R: Read + ?Sized>(inner: &mut R, expected: usize) -> Result<Reply> {
    let mut buf = BytesMut::zeroed(expected);
    let mut filled = 0usize;

    while filled < expected {
        match inner.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => break,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }

    if filled < expected {
        return Err(FrameError::ShortReply {
            expected,
            actual: filled,
        });
    }

    Ok(Reply::new(buf.freeze()))
}
