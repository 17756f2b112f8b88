use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::Transport;

/// Line rate the SM-10 controller is fixed to.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Read timeout applied to each blocking read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

#[cfg(windows)]
const DEFAULT_PORT: &str = "COM3";
#[cfg(not(windows))]
const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Serial line settings used to open a [`SerialTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    /// Port name (`COM3`, `/dev/ttyUSB0`, ...).
    pub port: String,
    /// Baud rate. Default: 115200.
    pub baud_rate: u32,
    /// Data bits per character. Default: 8.
    pub data_bits: DataBits,
    /// Parity checking mode. Default: none.
    pub parity: Parity,
    /// Stop bits per character. Default: 1.
    pub stop_bits: StopBits,
    /// Read timeout. Default: 100 ms.
    pub timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SerialSettings {
    /// Default settings on an explicit port.
    pub fn for_port(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }
}

/// A serial port opened with [`SerialSettings`].
///
/// The port handle is closed when the transport is dropped.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialTransport {
    /// Open a serial port.
    pub fn open(settings: &SerialSettings) -> Result<Self> {
        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .data_bits(settings.data_bits)
            .parity(settings.parity)
            .stop_bits(settings.stop_bits)
            .flow_control(FlowControl::None)
            .timeout(settings.timeout)
            .open()
            .map_err(|source| TransportError::Open {
                port: settings.port.clone(),
                source,
            })?;

        info!(
            port = %settings.port,
            baud = settings.baud_rate,
            timeout_ms = settings.timeout.as_millis() as u64,
            "serial port opened"
        );

        Ok(Self {
            port,
            name: settings.port.clone(),
        })
    }
}

impl Read for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl Transport for SerialTransport {
    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(TransportError::Configure)
    }

    fn timeout(&self) -> Duration {
        self.port.timeout()
    }

    fn clear_input(&mut self) -> Result<()> {
        self.port
            .clear(ClearBuffer::Input)
            .map_err(TransportError::Configure)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        debug!(port = %self.name, "closing serial port");
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port", &self.name)
            .finish()
    }
}

/// A serial port discovered on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Name to pass as [`SerialSettings::port`].
    pub name: String,
    /// Bus type (`usb`, `pci`, `bluetooth`, `unknown`).
    pub kind: &'static str,
    /// Product or manufacturer string, when the OS reports one.
    pub description: Option<String>,
}

/// List the serial ports available on this machine.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|p| {
            let (kind, description) = match p.port_type {
                SerialPortType::UsbPort(usb) => ("usb", usb.product.or(usb.manufacturer)),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortInfo {
                name: p.port_name,
                kind,
                description,
            }
        })
        .collect())
}
