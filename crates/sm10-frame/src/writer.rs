use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, Frame, FRAME_OVERHEAD};
use crate::error::{FrameError, Result};

/// Encode `frame` and write it to `inner` in full (blocking), then flush.
///
/// Returns the encoded bytes so callers can trace what went over the wire.
pub fn write_frame<W: Write + ?Sized>(inner: &mut W, frame: &Frame) -> Result<BytesMut> {
    let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + frame.params.len());
    encode_frame(frame.command_id, frame.params.len(), &frame.params, &mut buf)?;

    let mut offset = 0usize;
    while offset < buf.len() {
        match inner.write(&buf[offset..]) {
            Ok(0) => return Err(FrameError::ConnectionClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }

    flush(inner)?;
    trace!(
        opcode = frame.command_id,
        bytes = buf.len(),
        "frame written"
    );
    Ok(buf)
}

fn flush<W: Write + ?Sized>(inner: &mut W) -> Result<()> {
    loop {
        match inner.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
}
