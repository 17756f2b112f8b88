//! Command/response driver for Luigs & Neumann SM-10 manipulator controllers.
//!
//! This is the layer applications use. Open a [`Sm10`] with [`connect`] or
//! [`connect_with_config`], then issue commands; each call is one blocking
//! transaction (encode, write, settle, read, decode).

pub mod command;
pub mod config;
pub mod connector;
pub mod driver;
pub mod error;
pub mod log;

pub use command::{Approach, AxisStatus, Command, StoredPosition};
pub use config::{default_log_path, DriverConfig, Verbosity, DEFAULT_SETTLE};
pub use connector::{connect, connect_with_config};
pub use driver::Sm10;
pub use error::{DriverError, Result};
pub use log::TransactionLog;
