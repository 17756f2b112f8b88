//! Vendor command table.
//!
//! Opcodes, parameter counts and reply lengths are fixed by the controller
//! firmware. Keep them here and nowhere else.

/// Opcode and framing lengths for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// 2-byte command id.
    pub opcode: u16,
    /// Number of parameter bytes the command carries.
    pub param_len: usize,
    /// Number of bytes the controller answers with.
    pub reply_len: usize,
}

impl CommandSpec {
    const fn new(opcode: u16, param_len: usize, reply_len: usize) -> Self {
        Self {
            opcode,
            param_len,
            reply_len,
        }
    }

    /// Human-readable command name.
    pub fn name(&self) -> &'static str {
        opcode_name(self.opcode)
    }
}

/// Reply length of commands that only acknowledge.
pub const ACK_REPLY_LEN: usize = 5;

/// Offset of the float position field in a position inquiry reply.
pub const POSITION_OFFSET: usize = 4;

/// Offset of the status byte in an axis status reply.
pub const STATUS_OFFSET: usize = 4;

/// Read the position shown on the controller console (axis).
pub const POSITION_INQUIRY: CommandSpec = CommandSpec::new(0x0101, 1, 10);

/// Move fast to an absolute position (axis, f32).
pub const APPROACH_ABSOLUTE_FAST: CommandSpec = CommandSpec::new(0x0048, 5, ACK_REPLY_LEN);

/// Move slowly to an absolute position (axis, f32).
pub const APPROACH_ABSOLUTE_SLOW: CommandSpec = CommandSpec::new(0x0049, 5, ACK_REPLY_LEN);

/// Move fast by a relative distance (axis, f32).
pub const APPROACH_RELATIVE_FAST: CommandSpec = CommandSpec::new(0x004a, 5, ACK_REPLY_LEN);

/// Move slowly by a relative distance (axis, f32).
pub const APPROACH_RELATIVE_SLOW: CommandSpec = CommandSpec::new(0x004b, 5, ACK_REPLY_LEN);

/// Query the axis power status (axis).
pub const AXIS_STATUS: CommandSpec = CommandSpec::new(0x011e, 1, 7);

/// Switch an axis off (axis).
pub const AXIS_OFF: CommandSpec = CommandSpec::new(0x0034, 1, ACK_REPLY_LEN);

/// Switch an axis on (axis).
pub const AXIS_ON: CommandSpec = CommandSpec::new(0x0035, 1, ACK_REPLY_LEN);

/// Move to a stored position slot (axis, slot).
pub const APPROACH_STORED_POSITION: CommandSpec = CommandSpec::new(0x0110, 2, ACK_REPLY_LEN);

/// Store the current position in a slot (axis, slot).
pub const STORE_POSITION: CommandSpec = CommandSpec::new(0x010a, 2, ACK_REPLY_LEN);

/// Select the approach command for a move.
///
/// | absolute | slow  | opcode |
/// |----------|-------|--------|
/// | true     | false | 0x0048 |
/// | true     | true  | 0x0049 |
/// | false    | false | 0x004a |
/// | false    | true  | 0x004b |
pub fn approach_opcode(absolute: bool, slow: bool) -> CommandSpec {
    match (absolute, slow) {
        (true, false) => APPROACH_ABSOLUTE_FAST,
        (true, true) => APPROACH_ABSOLUTE_SLOW,
        (false, false) => APPROACH_RELATIVE_FAST,
        (false, true) => APPROACH_RELATIVE_SLOW,
    }
}

/// Select the axis power command.
pub fn switch_opcode(on: bool) -> CommandSpec {
    if on {
        AXIS_ON
    } else {
        AXIS_OFF
    }
}

/// Returns a human-readable name for an opcode.
pub fn opcode_name(opcode: u16) -> &'static str {
    match opcode {
        0x0101 => "POSITION_INQUIRY",
        0x0048 => "APPROACH_ABSOLUTE_FAST",
        0x0049 => "APPROACH_ABSOLUTE_SLOW",
        0x004a => "APPROACH_RELATIVE_FAST",
        0x004b => "APPROACH_RELATIVE_SLOW",
        0x011e => "AXIS_STATUS",
        0x0034 => "AXIS_OFF",
        0x0035 => "AXIS_ON",
        0x0110 => "APPROACH_STORED_POSITION",
        0x010a => "STORE_POSITION",
        _ => "UNKNOWN",
    }
}
