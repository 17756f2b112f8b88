//! Driver for Luigs & Neumann SM-10 micromanipulator controllers.
//!
//! The controller speaks a fixed binary protocol over a 115200 baud serial
//! line. Each command is one synchronous transaction: encode a frame, write
//! it, wait for the controller to settle, read a fixed-length reply.
//!
//! # Crate Structure
//!
//! - [`transport`]: Byte-stream transport trait and serial port backend
//! - [`frame`]: Frame codec, command table, reply reader
//! - [`driver`]: The [`Sm10`](driver::Sm10) device handle and its configuration
//!
//! ```rust,no_run
//! use sm10::driver::{connect, Approach};
//!
//! let mut sm10 = connect("COM3");
//! let position = sm10.position_inquiry(15)?;
//! sm10.approach_position(15, position - 100.0, Approach::absolute())?;
//! # Ok::<(), sm10::driver::DriverError>(())
//! ```

/// Re-export transport types.
pub mod transport {
    pub use sm10_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use sm10_frame::*;
}

/// Re-export driver types.
pub mod driver {
    pub use sm10_driver::*;
}

pub use sm10_driver::{connect, connect_with_config, DriverConfig, DriverError, Sm10};
