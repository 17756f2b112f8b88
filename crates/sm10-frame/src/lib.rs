//! Binary frame codec for the Luigs & Neumann SM-10 serial protocol.
//!
//! Every command sent to the controller is one frame:
//! - A sync byte (`0x16`)
//! - A 2-byte big-endian command id
//! - A 1-byte parameter count followed by the parameter bytes
//! - A 2-byte checksum, always zero (deprecated by the vendor, still required)
//!
//! Replies have a fixed, command-specific length. Multi-byte numeric fields
//! travel least-significant byte first.

pub mod codec;
pub mod error;
pub mod opcode;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_byte_field, decode_float_field, encode_frame, float_to_parameter_bytes, Frame,
    FRAME_OVERHEAD, MAX_PARAMS, SYN,
};
pub use error::{FrameError, Result};
pub use opcode::{
    approach_opcode, opcode_name, switch_opcode, CommandSpec, ACK_REPLY_LEN, APPROACH_ABSOLUTE_FAST,
    APPROACH_ABSOLUTE_SLOW, APPROACH_RELATIVE_FAST, APPROACH_RELATIVE_SLOW,
    APPROACH_STORED_POSITION, AXIS_OFF, AXIS_ON, AXIS_STATUS, POSITION_INQUIRY, POSITION_OFFSET,
    STATUS_OFFSET, STORE_POSITION,
};
pub use reader::{read_reply, Reply};
pub use writer::write_frame;
