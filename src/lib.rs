//! # Terabee Hub Driver
//!
//! `terabee_hub` drives multi-sensor distance ranging hubs over a serial link.
//! It configures the hub (streaming on/off, output rate) and decodes the hub's
//! fixed-size telemetry frames into per-sensor range readings.
//!
//! The wire protocol lives in [`protocol`] and is free of I/O. [`Session`] owns
//! the transport and sequences bring-up, reading and shutdown.

extern crate byteorder;
extern crate log;
extern crate serialport;

pub mod base;
mod checksum;
pub mod cmds;
mod config;
mod internals;
pub mod protocol;
pub mod serial;
pub mod types;

pub use crate::base::{Channel, CommandFrame, Connector, Error, Result, Transport};
pub use crate::config::SessionConfig;
pub use crate::protocol::{
    decode, decode_verified, encode_activate_streaming, encode_deactivate_streaming,
    encode_frequency, encode_frequency_hz,
};
pub use crate::serial::{SerialConnector, SerialTransport};
pub use crate::types::{FrequencySetting, RangeReading, SensorReadingSet, SessionState};

use crate::cmds::HUB_FRAME_SIZE;
use log::{debug, error, trace, warn};
use std::fmt;
use std::time::Instant;

/// A connection to a ranging hub and the state the driver believes the hub is in.
///
/// The session moves `Closed -> Open -> Streaming` and back. Any transport failure
/// while reconfiguring the hub drops it to `Closed`: the hub's real state is then
/// unknown and the full `open` + `start` sequence has to run again.
///
/// A session must not be shared between threads without wrapping the whole
/// session in a lock, since commands and frame reads share one line.
///
/// # Example
/// ```ignore
/// # use terabee_hub::{FrequencySetting, Session, SessionConfig};
/// let config = SessionConfig::new("/dev/ttyACM0").frequency(FrequencySetting::Hz250);
/// let mut hub = Session::open_serial(config)?;
/// hub.start()?;
/// for _ in 0..50 {
///     println!("{:?}", hub.read_active()?);
/// }
/// hub.close()?;
/// ```
pub struct Session<C: Connector> {
    connector: C,
    config: SessionConfig,
    channel: Option<Channel<C::Transport>>,
    state: SessionState,
    frame_buf: [u8; HUB_FRAME_SIZE],
    // bytes of a partially received frame still to be discarded
    resync_bytes: usize,
}

impl Session<SerialConnector> {
    /// Opens the serial port named in `config`, leaving the session `Open`.
    pub fn open_serial(config: SessionConfig) -> Result<Session<SerialConnector>> {
        let mut session = Session::new(SerialConnector, config);
        session.open()?;
        Ok(session)
    }
}

impl<C: Connector> Session<C> {
    /// Creates a closed session. No I/O happens until `open`.
    pub fn new(connector: C, config: SessionConfig) -> Session<C> {
        trace!("Creating new Session for {}", config.path);
        Session {
            connector,
            config,
            channel: None,
            state: SessionState::Closed,
            frame_buf: [0; HUB_FRAME_SIZE],
            resync_bytes: 0,
        }
    }

    /// The state the hub is believed to be in.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The configuration this session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns `true` once `start` has completed.
    pub fn is_streaming(&self) -> bool {
        self.state == SessionState::Streaming
    }

    /// Acquires the transport and discards anything it had buffered.
    ///
    /// Only valid while `Closed`.
    pub fn open(&mut self) -> Result<()> {
        self.expect_state(SessionState::Closed, "open")?;
        debug!(
            "Opening {} at {} baud",
            self.config.path, self.config.baud_rate
        );
        let transport = match self.connector.connect(&self.config) {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to open {}: {}", self.config.path, e);
                return Err(e.into());
            }
        };

        let mut channel = Channel::new(transport, self.config.settle_delay);
        channel.settle()?;
        self.channel = Some(channel);
        self.set_state(SessionState::Open);
        Ok(())
    }

    /// Turns streaming on and selects the configured output rate.
    ///
    /// Streaming is activated before the rate is set, with a settle and drain
    /// after each command. Only valid while `Open`.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state(SessionState::Open, "start")?;
        debug!("Activating streaming at {}", self.config.frequency);
        let frequency = self.config.frequency;
        self.transition(|channel| {
            channel.send(&encode_activate_streaming())?;
            channel.send(&encode_frequency(Some(frequency)))?;
            Ok(())
        })?;
        self.resync_bytes = 0;
        self.set_state(SessionState::Streaming);
        Ok(())
    }

    /// Turns streaming off but keeps the transport open.
    ///
    /// Only valid while `Streaming`.
    pub fn stop(&mut self) -> Result<()> {
        self.expect_state(SessionState::Streaming, "stop")?;
        debug!("Deactivating streaming");
        self.transition(|channel| channel.send(&encode_deactivate_streaming()).map(|_| ()))?;
        self.set_state(SessionState::Open);
        Ok(())
    }

    /// Stops streaming if needed and releases the transport.
    ///
    /// Closing a closed session does nothing. The transport is released even if
    /// the deactivation command fails; that failure is still returned.
    pub fn close(&mut self) -> Result<()> {
        let result = match self.state {
            SessionState::Closed => {
                trace!("Session already closed");
                return Ok(());
            }
            SessionState::Open => Ok(()),
            SessionState::Streaming => match self.channel.as_mut() {
                Some(channel) => channel.send(&encode_deactivate_streaming()).map(|_| ()),
                None => Ok(()),
            },
        };
        if let Err(e) = &result {
            error!("Failed to deactivate streaming while closing: {}", e);
        }
        self.release();
        result
    }

    /// Reads and decodes the next telemetry frame.
    ///
    /// A timeout, a short frame or a checksum mismatch fails only this call;
    /// the session keeps streaming. After a short frame, the rest of that frame
    /// is discarded on the next call so reads stay aligned to frame boundaries.
    /// Only valid while `Streaming`.
    pub fn read(&mut self) -> Result<SensorReadingSet> {
        self.read_frame()
    }

    /// Reads the next frame into `readings`.
    ///
    /// `readings` is only written once a whole frame decoded successfully.
    pub fn read_into(&mut self, readings: &mut SensorReadingSet) -> Result<()> {
        *readings = self.read_frame()?;
        Ok(())
    }

    /// Reads the next frame and returns only the configured number of channels.
    pub fn read_active(&mut self) -> Result<Vec<RangeReading>> {
        let readings = self.read_frame()?;
        Ok(readings.active(self.config.sensor_count).to_vec())
    }

    fn read_frame(&mut self) -> Result<SensorReadingSet> {
        if self.state != SessionState::Streaming {
            return Err(self.invalid_state("read"));
        }
        let channel = match self.channel.as_mut() {
            Some(channel) => channel,
            None => return Err(self.invalid_state("read")),
        };

        let deadline = Instant::now() + self.config.read_timeout;
        if self.resync_bytes > 0 {
            let owed = self.resync_bytes;
            // An idle link marks a frame boundary, so whatever was not skipped is not owed anymore.
            self.resync_bytes = 0;
            match channel.skip(owed, deadline) {
                Ok(skipped) => debug!(
                    "Discarded {}/{} bytes of a broken frame",
                    skipped, owed
                ),
                Err(e) => {
                    error!("Transport error while resynchronising: {}", e);
                    return Err(e);
                }
            }
        }

        let received = match channel.read_frame(&mut self.frame_buf, deadline) {
            Ok(received) => received,
            Err(Error::OperationTimeout) => {
                warn!("No telemetry within {:?}", self.config.read_timeout);
                return Err(Error::OperationTimeout);
            }
            Err(e) => {
                error!("Transport error while reading telemetry: {}", e);
                return Err(e);
            }
        };
        if received < HUB_FRAME_SIZE {
            self.resync_bytes = HUB_FRAME_SIZE - received;
        }

        let frame = &self.frame_buf[..received];
        let result = if self.config.verify_checksum {
            decode_verified(frame)
        } else {
            decode(frame)
        };
        match &result {
            Ok(readings) => trace!("Decoded readings: {:?}", readings.as_slice()),
            Err(e) => warn!("Dropping telemetry frame: {}", e),
        }
        result
    }

    /// Runs a reconfiguration step; on failure the hub state is unknown and the session closes.
    fn transition<F>(&mut self, step: F) -> Result<()>
    where
        F: FnOnce(&mut Channel<C::Transport>) -> Result<()>,
    {
        let result = match self.channel.as_mut() {
            Some(channel) => step(channel),
            None => Err(self.invalid_state("reconfigure")),
        };
        if let Err(e) = &result {
            error!(
                "Reconfiguration failed, hub state unknown, closing session: {}",
                e
            );
            self.release();
        }
        result
    }

    fn release(&mut self) {
        if self.channel.take().is_some() {
            debug!("Released transport for {}", self.config.path);
        }
        self.set_state(SessionState::Closed);
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            debug!("Session state {} -> {}", self.state, state);
            self.state = state;
        }
    }

    fn expect_state(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    fn invalid_state(&self, operation: &'static str) -> Error {
        error!("Cannot {} while session is {}", operation, self.state);
        Error::InvalidState {
            operation,
            state: self.state,
        }
    }
}

impl<C: Connector> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

impl<C: Connector> Drop for Session<C> {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            if let Err(e) = self.close() {
                warn!("Error closing session on drop: {}", e);
            }
        }
    }
}
