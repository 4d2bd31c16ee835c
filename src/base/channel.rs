use crate::base::error::{Error, Result};
use crate::base::frame::CommandFrame;
use crate::base::traits::Transport;
use log::{error, trace, warn};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

const SKIP_CHUNK_SIZE: usize = 32;

/// Channel sends command frames and receives raw telemetry frames over a transport.
///
/// Every command is followed by a settle delay and a drain of both directions of
/// the link, since the hub may echo or emit transient bytes while it reconfigures.
///
/// # Examples
/// ```ignore
/// let mut channel = Channel::new(serial_port, Duration::from_millis(100));
///
/// channel.send(&encode_activate_streaming()).unwrap();
/// ```
#[derive(Debug)]
pub struct Channel<T> {
    stream: T,
    settle_delay: Duration,
}

impl<T> Channel<T>
where
    T: Transport,
{
    /// Create a new `Channel` over an already opened transport
    pub fn new(stream: T, settle_delay: Duration) -> Channel<T> {
        trace!("Creating new Channel with settle delay {:?}", settle_delay);
        Channel {
            stream,
            settle_delay,
        }
    }

    /// Wait for the settle delay, then discard everything buffered in either direction
    pub fn settle(&mut self) -> Result<()> {
        if !self.settle_delay.is_zero() {
            trace!("Settling for {:?}", self.settle_delay);
            thread::sleep(self.settle_delay);
        }
        self.drain()
    }

    /// Discard buffered input and output without waiting
    pub fn drain(&mut self) -> Result<()> {
        trace!("Clearing input and output buffers");
        if let Err(e) = self.stream.clear_input() {
            error!("Failed to clear input buffer: {}", e);
            return Err(e.into());
        }
        if let Err(e) = self.stream.clear_output() {
            error!("Failed to clear output buffer: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Write a command frame, then settle and drain
    ///
    /// # Example
    /// ```ignore
    /// channel.send(&encode_frequency(Some(FrequencySetting::Hz250))).unwrap();
    /// ```
    pub fn send(&mut self, frame: &CommandFrame) -> Result<usize> {
        trace!("Channel send called: {:?}", frame);
        if let Err(e) = self.stream.write_all(frame.as_bytes()) {
            error!("IO error writing command {:?}: {}", frame, e);
            return Err(e.into());
        }
        self.stream.flush()?;
        trace!("Command written and flushed");
        self.settle()?;
        Ok(frame.as_bytes().len())
    }

    /// Read up to `buf.len()` bytes, blocking no later than `deadline`
    ///
    /// Returns how many bytes were received. Fewer than requested means the
    /// transport timed out or stopped delivering bytes mid-frame. Fails with
    /// `Error::OperationTimeout` if nothing arrived at all.
    ///
    /// # Example
    /// ```ignore
    /// let mut frame = [0u8; HUB_FRAME_SIZE];
    /// let deadline = Instant::now() + Duration::from_secs(1);
    /// let received = channel.read_frame(&mut frame, deadline)?;
    /// ```
    pub fn read_frame(&mut self, buf: &mut [u8], deadline: Instant) -> Result<usize> {
        trace!("Channel read_frame called for {} bytes", buf.len());
        let received = self.fill(buf, deadline)?;
        if received == 0 {
            return Err(Error::OperationTimeout);
        }
        Ok(received)
    }

    /// Read and discard up to `count` bytes, blocking no later than `deadline`
    ///
    /// Used to throw away the tail of a frame that arrived only partially, so the
    /// next read starts on a frame boundary. Returns how many bytes were discarded.
    pub fn skip(&mut self, count: usize, deadline: Instant) -> Result<usize> {
        trace!("Skipping {} bytes", count);
        let mut scratch = [0u8; SKIP_CHUNK_SIZE];
        let mut skipped = 0;
        while skipped < count {
            let want = (count - skipped).min(SKIP_CHUNK_SIZE);
            let got = self.fill(&mut scratch[..want], deadline)?;
            skipped += got;
            if got < want {
                break;
            }
        }
        trace!("Skipped {}/{} bytes", skipped, count);
        Ok(skipped)
    }

    fn fill(&mut self, buf: &mut [u8], deadline: Instant) -> Result<usize> {
        let mut received = 0;

        while received < buf.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(
                    "Read deadline passed with {}/{} bytes",
                    received,
                    buf.len()
                );
                break;
            }
            self.stream.set_read_timeout(remaining)?;

            match self.stream.read(&mut buf[received..]) {
                Ok(0) => {
                    trace!("Stream read returned 0 bytes");
                    break;
                }
                Ok(n) => {
                    received += n;
                    trace!("Read {} bytes ({}/{})", n, received, buf.len());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    trace!("Stream read timed out after {} bytes", received);
                    break;
                }
                Err(e) => {
                    error!("IO error reading from stream: {}", e);
                    return Err(e.into());
                }
            }
        }
        Ok(received)
    }
}
