use crate::cmds::HUB_CHANNEL_COUNT;
use crate::internals::*;
use crate::types::FrequencySetting;
use std::time::Duration;

/// Settings a `Session` is created with.
///
/// A session never changes its configuration; build a new session to use
/// different settings.
///
/// # Example
/// ```
/// # use terabee_hub::{FrequencySetting, SessionConfig};
/// # use std::time::Duration;
/// let config = SessionConfig::new("/dev/ttyACM0")
///     .frequency(FrequencySetting::Hz250)
///     .read_timeout(Duration::from_millis(500))
///     .sensor_count(6);
/// assert_eq!(config.baud_rate, 921_600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Path or name of the serial device, e.g. `/dev/ttyACM0` or `COM3`.
    pub path: String,
    /// Baud rate of the link.
    pub baud_rate: u32,
    /// Longest time a single frame read may block.
    pub read_timeout: Duration,
    /// Pause after each command before the next one is sent.
    pub settle_delay: Duration,
    /// Output rate requested while bringing up streaming.
    pub frequency: FrequencySetting,
    /// Number of channels surfaced by `Session::read_active`, between 1 and 8.
    pub sensor_count: usize,
    /// Check the trailing CRC-8 of every telemetry frame.
    pub verify_checksum: bool,
}

impl SessionConfig {
    /// Creates a configuration for `path` with every other setting at its default.
    pub fn new(path: impl Into<String>) -> SessionConfig {
        SessionConfig {
            path: path.into(),
            ..SessionConfig::default()
        }
    }

    /// Sets the baud rate.
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the frame read timeout.
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Sets the delay observed after every command.
    pub fn settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Sets the output rate.
    pub fn frequency(mut self, frequency: FrequencySetting) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the output rate from a number in Hz.
    ///
    /// Unsupported rates fall back to 50 Hz, the same way `encode_frequency_hz` does.
    pub fn frequency_hz(mut self, hz: Option<u32>) -> Self {
        self.frequency = hz
            .and_then(FrequencySetting::from_hz)
            .unwrap_or_default();
        self
    }

    /// Sets how many channels are surfaced, clamped to 1..=8.
    pub fn sensor_count(mut self, sensor_count: usize) -> Self {
        self.sensor_count = sensor_count.clamp(1, HUB_CHANNEL_COUNT);
        self
    }

    /// Enables or disables telemetry checksum verification.
    pub fn verify_checksum(mut self, verify_checksum: bool) -> Self {
        self.verify_checksum = verify_checksum;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            path: String::new(),
            baud_rate: HUB_DEFAULT_BAUD_RATE,
            read_timeout: HUB_DEFAULT_READ_TIMEOUT,
            settle_delay: HUB_DEFAULT_SETTLE_DELAY,
            frequency: FrequencySetting::Hz50,
            sensor_count: HUB_DEFAULT_SENSOR_COUNT,
            verify_checksum: false,
        }
    }
}
