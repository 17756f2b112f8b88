use std::io::{Read, Write};
use std::time::Duration;

use crate::error::Result;

/// A blocking byte stream a driver can own exclusively.
///
/// `read` may return fewer bytes than requested, or a `TimedOut` error, once
/// the read timeout elapses. Callers that need an exact length keep reading
/// and decide for themselves what a short read means.
pub trait Transport: Read + Write {
    /// Set the read timeout applied to each blocking read.
    fn set_timeout(&mut self, timeout: Duration) -> Result<()>;

    /// Current read timeout.
    fn timeout(&self) -> Duration;

    /// Drop any bytes received but not yet read.
    fn clear_input(&mut self) -> Result<()>;

    /// Human-readable endpoint name for diagnostics.
    fn name(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        (**self).set_timeout(timeout)
    }

    fn timeout(&self) -> Duration {
        (**self).timeout()
    }

    fn clear_input(&mut self) -> Result<()> {
        (**self).clear_input()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
