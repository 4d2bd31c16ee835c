use crate::config::SessionConfig;
use std::io;
use std::time::Duration;

/// A byte-oriented link to the hub, such as an open serial port.
///
/// Closing the link is done by dropping it.
pub trait Transport: io::Read + io::Write {
    /// Discards any bytes received but not yet read.
    fn clear_input(&mut self) -> io::Result<()>;

    /// Discards any bytes written but not yet transmitted.
    fn clear_output(&mut self) -> io::Result<()>;

    /// Sets how long the next `read` may block before failing with `TimedOut`.
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn clear_input(&mut self) -> io::Result<()> {
        (**self).clear_input()
    }

    fn clear_output(&mut self) -> io::Result<()> {
        (**self).clear_output()
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        (**self).set_read_timeout(timeout)
    }
}

/// Acquires a `Transport` for a session.
///
/// The connector is asked for a fresh handle every time a session is opened,
/// so a closed session can be reopened without rebuilding it.
pub trait Connector {
    /// The transport this connector produces.
    type Transport: Transport;

    /// Opens the link described by `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - The session settings (port path, baud rate, read timeout).
    fn connect(&mut self, config: &SessionConfig) -> io::Result<Self::Transport>;
}
