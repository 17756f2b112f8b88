use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Sync byte that opens every frame (`<syn>`).
pub const SYN: u8 = 0x16;

/// Fixed bytes around the parameters: sync (1) + id (2) + count (1) + checksum (2).
pub const FRAME_OVERHEAD: usize = 6;

/// Largest parameter block the 1-byte count field can describe.
pub const MAX_PARAMS: usize = u8::MAX as usize;

/// Checksum bytes. The vendor deprecated the CRC but controllers still expect
/// the two bytes, and a non-zero value may be rejected.
const CHECKSUM: [u8; 2] = [0x00, 0x00];

/// A command frame: opcode plus its parameter bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The 2-byte command id.
    pub command_id: u16,
    /// Raw parameter bytes, in wire order.
    pub params: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command_id: u16, params: impl Into<Bytes>) -> Self {
        Self {
            command_id,
            params: params.into(),
        }
    }

    /// Create a frame after checking the caller's declared parameter count.
    ///
    /// Fails with `LengthMismatch` when `declared != params.len()` and with
    /// `ParameterOverflow` when the block cannot be framed.
    pub fn checked(command_id: u16, declared: usize, params: impl Into<Bytes>) -> Result<Self> {
        let params = params.into();
        if declared != params.len() {
            return Err(FrameError::LengthMismatch {
                declared,
                actual: params.len(),
            });
        }
        if params.len() > MAX_PARAMS {
            return Err(FrameError::ParameterOverflow(params.len()));
        }
        Ok(Self { command_id, params })
    }

    /// The total wire size of this frame (overhead + parameters).
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.params.len()
    }

    /// Encode the frame into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_frame(self.command_id, self.params.len(), &self.params, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// Encode a command into the wire format.
///
/// `declared` is the parameter count the caller expects to send. It must match
/// `params.len()`; a mismatch is a caller bug and nothing is written to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────────┬───────┬──────────────┬─────────┬─────────┐
/// │ SYN  │ Command id   │ Count │ Params       │ CRC LSB │ CRC MSB │
/// │ 0x16 │ (2B BE)      │ (1B)  │ (Count B)    │ 0x00    │ 0x00    │
/// └──────┴──────────────┴───────┴──────────────┴─────────┴─────────┘
/// ```
pub fn encode_frame(
    command_id: u16,
    declared: usize,
    params: &[u8],
    dst: &mut BytesMut,
) -> Result<()> {
    if declared != params.len() {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: params.len(),
        });
    }
    if params.len() > MAX_PARAMS {
        return Err(FrameError::ParameterOverflow(params.len()));
    }
    dst.reserve(FRAME_OVERHEAD + params.len());
    dst.put_u8(SYN);
    dst.put_u16(command_id);
    dst.put_u8(params.len() as u8);
    dst.put_slice(params);
    dst.put_slice(&CHECKSUM);
    Ok(())
}

/// Encode a float as four parameter bytes, least-significant byte first.
///
/// This is the big-endian IEEE-754 representation reversed, the byte order
/// the controller expects and also uses in its replies.
pub fn float_to_parameter_bytes(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Decode the 4-byte float field starting at `offset` of a reply.
pub fn decode_float_field(reply: &[u8], offset: usize) -> Result<f32> {
    // Saturated offsets past any reply length still fail the lookup below.
    let end = offset.saturating_add(4);
    let field = reply
        .get(offset..end)
        .ok_or(FrameError::ShortReply {
            expected: end,
            actual: reply.len(),
        })?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(field);
    Ok(f32::from_le_bytes(raw))
}

/// Decode the single byte at `offset` of a reply.
pub fn decode_byte_field(reply: &[u8], offset: usize) -> Result<u8> {
    reply.get(offset).copied().ok_or(FrameError::ShortReply {
        expected: offset.saturating_add(1),
        actual: reply.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(command_id: u16, params: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        encode_frame(command_id, params.len(), params, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_position_inquiry_wire_bytes() {
        let buf = encode(0x0101, &[15]);
        assert_eq!(buf.as_ref(), &[0x16, 0x01, 0x01, 0x01, 0x0F, 0x00, 0x00]);
    }

    #[test]
    fn test_frame_layout_for_various_param_lengths() {
        for len in [0usize, 1, 2, 5, 17, 255] {
            let params: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let buf = encode(0x004b, &params);

            assert_eq!(buf.len(), FRAME_OVERHEAD + len);
            assert_eq!(buf[0], SYN);
            assert_eq!(&buf[1..3], &[0x00, 0x4b]);
            assert_eq!(buf[3] as usize, len);
            assert_eq!(&buf[4..4 + len], params.as_slice());
            assert_eq!(&buf[buf.len() - 2..], &[0x00, 0x00]);
        }
    }

    #[test]
    fn test_declared_count_mismatch_fails() {
        let mut buf = BytesMut::new();
        let err = encode_frame(0x0101, 1, &[], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch {
                declared: 1,
                actual: 0
            }
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_parameter_overflow_fails() {
        let params = vec![0u8; 256];
        let mut buf = BytesMut::new();
        let err = encode_frame(0x0101, params.len(), &params, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::ParameterOverflow(256)));
    }

    #[test]
    fn test_float_parameter_bytes_are_reversed_big_endian() {
        let mut expected = (-100.0f32).to_be_bytes();
        expected.reverse();
        assert_eq!(float_to_parameter_bytes(-100.0), expected);
        assert_eq!(float_to_parameter_bytes(-100.0), [0x00, 0x00, 0xC8, 0xC2]);
    }

    #[test]
    fn test_float_field_mirrors_parameter_bytes() {
        for value in [0.0f32, -0.0, 1.5, -100.0, 12345.678, f32::MIN_POSITIVE, f32::MAX] {
            let mut reply = vec![0xAA; 4];
            reply.extend_from_slice(&float_to_parameter_bytes(value));
            reply.extend_from_slice(&[0x00, 0x00]);

            let decoded = decode_float_field(&reply, 4).unwrap();
            assert_eq!(decoded.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_float_field_short_reply() {
        let err = decode_float_field(&[0, 0, 0, 0, 1, 2], 4).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortReply {
                expected: 8,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_byte_field() {
        assert_eq!(decode_byte_field(&[1, 2, 3, 4, 0x02, 0, 0], 4).unwrap(), 0x02);
        assert!(matches!(
            decode_byte_field(&[1, 2, 3], 4),
            Err(FrameError::ShortReply { expected: 5, actual: 3 })
        ));
    }

    #[test]
    fn test_field_offsets_near_usize_max_are_short_replies() {
        assert!(matches!(
            decode_float_field(&[0u8; 10], usize::MAX - 1),
            Err(FrameError::ShortReply {
                expected: usize::MAX,
                actual: 10
            })
        ));
        assert!(matches!(
            decode_byte_field(&[0u8; 7], usize::MAX),
            Err(FrameError::ShortReply {
                expected: usize::MAX,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_checked_frame_validates_count() {
        let frame = Frame::checked(0x011e, 1, vec![3u8]).unwrap();
        assert_eq!(frame.params.as_ref(), &[3]);

        let err = Frame::checked(0x011e, 2, vec![3u8]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch {
                declared: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_frame_wire_size() {
        let frame = Frame::new(0x0049, Bytes::from_static(&[1, 0, 0, 0x20, 0x41]));
        assert_eq!(frame.wire_size(), FRAME_OVERHEAD + 5);
        assert_eq!(frame.to_bytes().unwrap().len(), frame.wire_size());
    }
}
