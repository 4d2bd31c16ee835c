use crate::types::SessionState;
use std::error;
use std::fmt;
use std::io;

/// Represents errors that can occur while talking to a ranging hub.
#[derive(Debug)]
pub enum Error {
    /// The underlying transport (e.g. the serial port) failed to open, write, read or flush.
    Transport(io::Error),

    /// A telemetry frame did not have the fixed frame length.
    FrameLength { expected: usize, actual: usize },

    /// The operation was invoked outside the session state it is valid in.
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// The trailing checksum byte of a telemetry frame did not match its contents.
    Checksum { expected: u8, actual: u8 },

    /// No bytes arrived within the configured read timeout.
    OperationTimeout,
}

impl Error {
    /// Returns `true` if the session survives this error and the caller may simply read again.
    ///
    /// Timeouts, short frames and checksum mismatches only spoil the current read cycle.
    /// Transport failures and state violations are not recoverable at this layer.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::OperationTimeout | Error::FrameLength { .. } | Error::Checksum { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "transport error: {}", err),
            Error::FrameLength { expected, actual } => write!(
                f,
                "invalid frame length: expected {} bytes, got {}",
                expected, actual
            ),
            Error::InvalidState { operation, state } => {
                write!(f, "cannot {} while session is {}", operation, state)
            }
            Error::Checksum { expected, actual } => write!(
                f,
                "frame checksum mismatch: expected {:02X}, got {:02X}",
                expected, actual
            ),
            Error::OperationTimeout => write!(f, "operation timeout"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Transport(err)
    }
}

/// A specialized `Result` type for ranging hub operations.
pub type Result<T> = std::result::Result<T, Error>;
