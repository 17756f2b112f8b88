//! Byte-stream transport abstraction for the SM-10 driver.
//!
//! The driver never talks to a port directly. It owns something that
//! implements [`Transport`]: a blocking `Read + Write` stream with a
//! configurable read timeout. [`SerialTransport`] is the production backend,
//! opened with the controller's fixed line settings (115200 baud, 8-N-1).

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::{available_ports, PortInfo, SerialSettings, SerialTransport};
pub use traits::Transport;
