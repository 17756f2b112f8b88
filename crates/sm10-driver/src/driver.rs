use std::time::Duration;

use sm10_frame::{
    approach_opcode, opcode_name, read_reply, switch_opcode, write_frame, Frame, FrameError,
    Reply, APPROACH_STORED_POSITION, AXIS_STATUS, POSITION_INQUIRY, POSITION_OFFSET,
    STATUS_OFFSET, STORE_POSITION,
};
use sm10_transport::{SerialTransport, Transport, TransportError};
use tracing::{debug, info};

use crate::command::{Approach, AxisStatus, Command, StoredPosition};
use crate::config::DriverConfig;
use crate::error::{DriverError, Result};
use crate::log::TransactionLog;

/// A Luigs & Neumann SM-10 controller on one exclusively owned transport.
///
/// Every operation is a single blocking transaction. Operations take
/// `&mut self`; wrap the driver in a `Mutex` to share it between threads.
///
/// A driver whose transport failed to open is *disconnected*: it still logs
/// and can be inspected, but every transaction returns
/// [`DriverError::ConnectionUnavailable`] without touching any I/O.
pub struct Sm10<T: Transport = SerialTransport> {
    transport: Option<T>,
    open_error: Option<TransportError>,
    log: TransactionLog,
    port: String,
    settle: Duration,
    serial_debug: bool,
}

impl<T: Transport> Sm10<T> {
    /// Assemble a driver from an already acquired transport and log.
    ///
    /// `transport` is `Err` when opening it failed; the driver is then
    /// disconnected and keeps the error for inspection.
    pub fn from_parts(
        transport: std::result::Result<T, TransportError>,
        mut log: TransactionLog,
        config: &DriverConfig,
    ) -> Self {
        let (transport, open_error) = match transport {
            Ok(transport) => {
                info!(port = %transport.name(), "SM10 connected");
                log.write("SM10 serial connection established");
                (Some(transport), None)
            }
            Err(err) => {
                info!(port = %config.serial.port, %err, "SM10 connection failed");
                log.write("SM10 serial connection failed");
                (None, Some(err))
            }
        };

        Self {
            transport,
            open_error,
            log,
            port: config.serial.port.clone(),
            settle: config.settle,
            serial_debug: config.serial_debug,
        }
    }

    /// Wrap an open transport, opening the log sinks `config` selects.
    pub fn with_transport(transport: T, config: &DriverConfig) -> Self {
        let log = TransactionLog::open(config.verbosity, &config.log_path);
        Self::from_parts(Ok(transport), log, config)
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Why the transport could not be opened, for a disconnected driver.
    pub fn open_error(&self) -> Option<&TransportError> {
        self.open_error.as_ref()
    }

    /// Take ownership of the open error, leaving `None` behind.
    pub fn take_open_error(&mut self) -> Option<TransportError> {
        self.open_error.take()
    }

    /// Configured port name.
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Change the wait between sending a command and reading its reply.
    pub fn set_settle(&mut self, settle: Duration) {
        self.settle = settle;
    }

    /// Toggle hex traces of sent frames and received replies.
    pub fn set_serial_debug(&mut self, enabled: bool) {
        self.serial_debug = enabled;
    }

    /// Borrow the transport, if connected.
    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    /// Mutably borrow the transport, if connected.
    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    /// Write a line to the transaction log.
    pub fn write_log(&mut self, msg: &str) {
        self.log.write(msg);
    }

    /// Close the transport. The driver stays usable as a disconnected handle.
    pub fn disconnect(&mut self) {
        if let Some(transport) = self.transport.take() {
            debug!(port = %transport.name(), "SM10 disconnecting");
            drop(transport);
            self.log.write("SM10 serial connection terminated");
        }
    }

    /// Send one command and read its fixed-length reply.
    ///
    /// `declared` must equal `params.len()`; otherwise nothing is transmitted
    /// and `LengthMismatch` is returned. After the frame is written the driver
    /// sleeps for the settle duration, then reads exactly `reply_len` bytes
    /// within the transport's read timeout. There is no retry.
    pub fn send_command(
        &mut self,
        command_id: u16,
        declared: usize,
        params: &[u8],
        reply_len: usize,
    ) -> Result<Reply> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(DriverError::ConnectionUnavailable);
        };

        let frame = match Frame::checked(command_id, declared, params.to_vec()) {
            Ok(frame) => frame,
            Err(FrameError::LengthMismatch { declared, actual }) => {
                if self.serial_debug {
                    self.log.write(&format!(
                        "\t(Error in serial command: attempting to read {declared} byte(s) \
                         but {actual} is(were) sent)"
                    ));
                }
                return Err(DriverError::LengthMismatch { declared, actual });
            }
            Err(err) => return Err(err.into()),
        };

        transport.clear_input()?;
        let sent = write_frame(transport, &frame)?;
        debug!(
            opcode = opcode_name(command_id),
            bytes = sent.len(),
            "command sent"
        );
        if self.serial_debug {
            self.log.write(&format!("\t(Sending: {})", hex::encode(&sent)));
        }

        std::thread::sleep(self.settle);

        let reply = match read_reply(transport, reply_len) {
            Ok(reply) => reply,
            Err(FrameError::ShortReply { expected, actual }) => {
                debug!(
                    opcode = opcode_name(command_id),
                    expected, actual, "short reply"
                );
                if self.serial_debug {
                    self.log.write(&format!(
                        "\t(Short reply: expected {expected} byte(s), got {actual})"
                    ));
                }
                return Err(DriverError::ShortReply { expected, actual });
            }
            Err(err) => return Err(err.into()),
        };

        if self.serial_debug {
            self.log.write(&format!("\t(Received: {})", hex::encode(reply.as_bytes())));
        }
        Ok(reply)
    }

    /// Send a command built from the command table.
    pub fn transact(&mut self, command: &Command) -> Result<Reply> {
        self.send_command(
            command.spec.opcode,
            command.spec.param_len,
            &command.params,
            command.spec.reply_len,
        )
    }

    /// Position shown on the controller console for `axis`, in micrometers.
    pub fn position_inquiry(&mut self, axis: u8) -> Result<f32> {
        self.log.write(&format!("Query axis {axis} position ..."));

        let reply = self.transact(&Command::axis(POSITION_INQUIRY, axis))?;
        let position = reply.float_at(POSITION_OFFSET)?;

        self.log.write(&format!("Axis {axis} position = {position:+.4}"));
        Ok(position)
    }

    /// Move `axis` to (or by) `position` micrometers.
    ///
    /// The opcode is selected from `mode.absolute` and `mode.slow`; with
    /// `mode.reverse` the position is negated before encoding.
    pub fn approach_position(&mut self, axis: u8, position: f32, mode: Approach) -> Result<Reply> {
        let spec = approach_opcode(mode.absolute, mode.slow);
        let position = mode.wire_position(position);

        self.log
            .write(&format!("(axis: {axis}) {}: {position:+.4} um", mode.describe()));

        self.transact(&Command::axis_float(spec, axis, position))
    }

    /// Move `axis` to a stored position slot (1 to 5).
    pub fn approach_stored_position(&mut self, axis: u8, slot: u8) -> Result<Reply> {
        let slot = StoredPosition::new(slot).ok_or(DriverError::InvalidStoredPosition(slot))?;

        let reply = self.transact(&Command::axis_slot(APPROACH_STORED_POSITION, axis, slot))?;

        self.log.write(&format!("Approaching stored position {}", slot.get()));
        Ok(reply)
    }

    /// Store the current position of `axis` in a slot (1 to 5).
    ///
    /// Returns the stored position, read back with a position inquiry.
    pub fn store_position(&mut self, axis: u8, slot: u8) -> Result<f32> {
        let slot = StoredPosition::new(slot).ok_or(DriverError::InvalidStoredPosition(slot))?;

        self.transact(&Command::axis_slot(STORE_POSITION, axis, slot))?;
        let position = self.position_inquiry(axis)?;

        self.log
            .write(&format!("Stored position {}: {position:+.4}", slot.get()));
        Ok(position)
    }

    /// Status byte of `axis`.
    pub fn axis_status(&mut self, axis: u8) -> Result<AxisStatus> {
        let reply = self.transact(&Command::axis(AXIS_STATUS, axis))?;
        let status = AxisStatus::new(reply.byte_at(STATUS_OFFSET)?);

        self.log.write(&format!("Axis {axis} status: {status}"));
        Ok(status)
    }

    /// Switch `axis` power on or off.
    pub fn axis_switch(&mut self, axis: u8, on: bool) -> Result<Reply> {
        let reply = self.transact(&Command::axis(switch_opcode(on), axis))?;

        let state = if on { "ON" } else { "OFF" };
        self.log.write(&format!("Axis {axis} switched {state}"));
        Ok(reply)
    }
}

impl<T: Transport> Drop for Sm10<T> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<T: Transport> std::fmt::Debug for Sm10<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sm10")
            .field("port", &self.port)
            .field("connected", &self.is_connected())
            .field("settle", &self.settle)
            .field("serial_debug", &self.serial_debug)
            .field("log", &self.log)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{ErrorKind, Read, Write};

    use sm10_frame::float_to_parameter_bytes;

    use super::*;

    /// Replies are queued per frame; each flush releases the next one.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: VecDeque<Vec<u8>>,
        pending: VecDeque<u8>,
        written: Vec<u8>,
        clears: usize,
    }

    impl ScriptedTransport {
        fn with_replies(replies: Vec<Vec<u8>>) -> Self {
            Self {
                replies: replies.into(),
                ..Self::default()
            }
        }
    }

    impl Read for ScriptedTransport {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pending.is_empty() {
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            let n = buf.len().min(self.pending.len());
            for slot in buf.iter_mut().take(n) {
                *slot = self.pending.pop_front().unwrap_or_default();
            }
            Ok(n)
        }
    }

    impl Write for ScriptedTransport {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if let Some(reply) = self.replies.pop_front() {
                self.pending.extend(reply);
            }
            Ok(())
        }
    }

    impl Transport for ScriptedTransport {
        fn set_timeout(&mut self, _timeout: Duration) -> sm10_transport::Result<()> {
            Ok(())
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(100)
        }

        fn clear_input(&mut self) -> sm10_transport::Result<()> {
            self.clears += 1;
            self.pending.clear();
            Ok(())
        }

        fn name(&self) -> String {
            "scripted".to_string()
        }
    }

    fn quiet_config() -> DriverConfig {
        DriverConfig {
            settle: Duration::ZERO,
            ..DriverConfig::default()
        }
    }

    fn driver(replies: Vec<Vec<u8>>) -> Sm10<ScriptedTransport> {
        Sm10::from_parts(
            Ok(ScriptedTransport::with_replies(replies)),
            TransactionLog::disabled(),
            &quiet_config(),
        )
    }

    fn position_reply(value: f32) -> Vec<u8> {
        let mut reply = vec![0x06, 0x01, 0x01, 0x04];
        reply.extend_from_slice(&float_to_parameter_bytes(value));
        reply.extend_from_slice(&[0x00, 0x00]);
        reply
    }

    #[test]
    fn hex_trace_format() {
        assert_eq!(hex::encode([0x16, 0x01, 0x01, 0x01, 0x0f, 0x00, 0x00]), "160101010f0000");
    }

    #[test]
    fn send_command_writes_frame_and_reads_reply() {
        let mut sm10 = driver(vec![vec![0x06, 0x00, 0x35, 0x00, 0x00]]);
        let reply = sm10.send_command(0x0035, 1, &[2], 5).unwrap();

        assert_eq!(reply.as_bytes(), &[0x06, 0x00, 0x35, 0x00, 0x00]);
        let transport = sm10.transport().unwrap();
        assert_eq!(transport.written, vec![0x16, 0x00, 0x35, 0x01, 0x02, 0x00, 0x00]);
        assert_eq!(transport.clears, 1);
    }

    #[test]
    fn length_mismatch_does_not_transmit() {
        let mut sm10 = driver(vec![]);
        let err = sm10.send_command(0x0101, 1, &[], 10).unwrap_err();

        assert!(matches!(
            err,
            DriverError::LengthMismatch {
                declared: 1,
                actual: 0
            }
        ));
        let transport = sm10.transport().unwrap();
        assert!(transport.written.is_empty());
        assert_eq!(transport.clears, 0);
    }

    #[test]
    fn position_inquiry_decodes_float() {
        let mut sm10 = driver(vec![position_reply(-100.0)]);
        assert_eq!(sm10.position_inquiry(15).unwrap(), -100.0);
    }

    #[test]
    fn short_reply_is_not_decoded() {
        let mut sm10 = driver(vec![vec![0x06, 0x01, 0x01]]);
        let err = sm10.position_inquiry(15).unwrap_err();
        assert!(matches!(
            err,
            DriverError::ShortReply {
                expected: 10,
                actual: 3
            }
        ));
    }

    #[test]
    fn stale_input_is_discarded_before_sending() {
        let mut sm10 = driver(vec![vec![0, 0, 0, 0, 0x01, 0, 0]]);
        sm10.transport_mut()
            .unwrap()
            .pending
            .extend([0xEE, 0xEE, 0xEE]);

        let status = sm10.axis_status(3).unwrap();
        assert_eq!(status.raw(), 0x01);
    }

    #[test]
    fn disconnected_driver_fails_fast() {
        let err = TransportError::Io(std::io::Error::from(ErrorKind::NotFound));
        let mut sm10: Sm10<ScriptedTransport> =
            Sm10::from_parts(Err(err), TransactionLog::disabled(), &quiet_config());

        assert!(!sm10.is_connected());
        assert!(sm10.open_error().is_some());
        assert!(matches!(
            sm10.position_inquiry(1),
            Err(DriverError::ConnectionUnavailable)
        ));
        assert!(matches!(
            sm10.send_command(0x0101, 1, &[], 10),
            Err(DriverError::ConnectionUnavailable)
        ));
    }

    #[test]
    fn disconnect_releases_transport() {
        let mut sm10 = driver(vec![]);
        assert!(sm10.is_connected());
        sm10.disconnect();
        assert!(!sm10.is_connected());
        assert!(matches!(
            sm10.axis_switch(1, true),
            Err(DriverError::ConnectionUnavailable)
        ));
    }

    #[test]
    fn invalid_slot_is_rejected_before_transmit() {
        let mut sm10 = driver(vec![]);
        assert!(matches!(
            sm10.approach_stored_position(1, 0),
            Err(DriverError::InvalidStoredPosition(0))
        ));
        assert!(matches!(
            sm10.store_position(1, 6),
            Err(DriverError::InvalidStoredPosition(6))
        ));
        assert!(sm10.transport().unwrap().written.is_empty());
    }
}
