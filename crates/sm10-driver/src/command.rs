use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use sm10_frame::{float_to_parameter_bytes, CommandSpec};

/// One command ready to send: table entry plus parameter bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Opcode and lengths from the command table.
    pub spec: CommandSpec,
    /// Parameter bytes in wire order.
    pub params: Bytes,
}

impl Command {
    pub fn new(spec: CommandSpec, params: impl Into<Bytes>) -> Self {
        Self {
            spec,
            params: params.into(),
        }
    }

    /// Command addressed to one axis.
    pub fn axis(spec: CommandSpec, axis: u8) -> Self {
        Self::new(spec, vec![axis])
    }

    /// Axis followed by a float, least-significant byte first.
    pub fn axis_float(spec: CommandSpec, axis: u8, value: f32) -> Self {
        let mut params = BytesMut::with_capacity(5);
        params.put_u8(axis);
        params.put_slice(&float_to_parameter_bytes(value));
        Self::new(spec, params.freeze())
    }

    /// Axis followed by a stored position slot.
    pub fn axis_slot(spec: CommandSpec, axis: u8, slot: StoredPosition) -> Self {
        Self::new(spec, vec![axis, slot.get()])
    }
}

/// How `approach_position` moves an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approach {
    /// Target is an absolute position; otherwise a relative distance.
    pub absolute: bool,
    /// Use the slow speed profile.
    pub slow: bool,
    /// Negate the position before sending (axis mounted reversed).
    pub reverse: bool,
}

impl Default for Approach {
    fn default() -> Self {
        Self {
            absolute: true,
            slow: true,
            reverse: false,
        }
    }
}

impl Approach {
    /// Slow move to an absolute position.
    pub fn absolute() -> Self {
        Self::default()
    }

    /// Slow move by a relative distance.
    pub fn relative() -> Self {
        Self {
            absolute: false,
            ..Self::default()
        }
    }

    pub fn fast(self) -> Self {
        Self {
            slow: false,
            ..self
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            reverse: true,
            ..self
        }
    }

    /// Position as sent on the wire.
    pub fn wire_position(&self, position: f32) -> f32 {
        if self.reverse {
            -position
        } else {
            position
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match (self.absolute, self.slow) {
            (true, false) => "Moving fast to absolute position",
            (true, true) => "Moving slow to absolute position",
            (false, false) => "Moving fast to relative position",
            (false, true) => "Moving slow to relative position",
        }
    }
}

/// Axis status byte, passed through from the controller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisStatus(u8);

impl AxisStatus {
    pub fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// The status byte as received.
    pub fn raw(self) -> u8 {
        self.0
    }
}

impl From<AxisStatus> for u8 {
    fn from(status: AxisStatus) -> Self {
        status.0
    }
}

impl fmt::Display for AxisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "OFF"),
            1 => write!(f, "ON"),
            other => write!(f, "0x{other:02X}"),
        }
    }
}

/// A position memory slot, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredPosition(u8);

impl StoredPosition {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` outside `1..=5`.
    pub fn new(slot: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&slot).then_some(Self(slot))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use sm10_frame::{APPROACH_RELATIVE_SLOW, POSITION_INQUIRY, STORE_POSITION};

    use super::*;

    #[test]
    fn axis_float_params() {
        let cmd = Command::axis_float(APPROACH_RELATIVE_SLOW, 15, -100.0);
        assert_eq!(cmd.params.as_ref(), &[15, 0x00, 0x00, 0xC8, 0xC2]);
        assert_eq!(cmd.params.len(), cmd.spec.param_len);
    }

    #[test]
    fn axis_params() {
        let cmd = Command::axis(POSITION_INQUIRY, 7);
        assert_eq!(cmd.params.as_ref(), &[7]);
    }

    #[test]
    fn slot_params() {
        let slot = StoredPosition::new(5).unwrap();
        let cmd = Command::axis_slot(STORE_POSITION, 2, slot);
        assert_eq!(cmd.params.as_ref(), &[2, 5]);
    }

    #[test]
    fn stored_position_range() {
        assert!(StoredPosition::new(0).is_none());
        assert!(StoredPosition::new(1).is_some());
        assert!(StoredPosition::new(5).is_some());
        assert!(StoredPosition::new(6).is_none());
    }

    #[test]
    fn approach_builders() {
        assert_eq!(
            Approach::default(),
            Approach {
                absolute: true,
                slow: true,
                reverse: false
            }
        );
        let mode = Approach::relative().fast().reversed();
        assert!(!mode.absolute && !mode.slow && mode.reverse);
        assert_eq!(mode.wire_position(12.5), -12.5);
        assert_eq!(Approach::absolute().wire_position(12.5), 12.5);
    }

    #[test]
    fn status_display() {
        assert_eq!(AxisStatus::new(0).to_string(), "OFF");
        assert_eq!(AxisStatus::new(1).to_string(), "ON");
        assert_eq!(AxisStatus::new(2).to_string(), "0x02");
        assert_eq!(u8::from(AxisStatus::new(0x80)), 0x80);
    }
}
