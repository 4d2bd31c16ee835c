use crate::cmds::*;
use std::fmt;
use std::ops::Index;

/// Output rates the hub can be configured to stream at.
///
/// No other rate is accepted by the device; see `FrequencySetting::from_hz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencySetting {
    /// 50 Hz, the rate the hub falls back to when nothing valid is requested.
    #[default]
    Hz50,
    /// 100 Hz
    Hz100,
    /// 250 Hz
    Hz250,
    /// 500 Hz
    Hz500,
    /// 600 Hz
    Hz600,
}

impl FrequencySetting {
    /// Every supported output rate, slowest first.
    pub const ALL: [FrequencySetting; 5] = [
        FrequencySetting::Hz50,
        FrequencySetting::Hz100,
        FrequencySetting::Hz250,
        FrequencySetting::Hz500,
        FrequencySetting::Hz600,
    ];

    /// Maps a numeric rate in Hz to a setting, or `None` if the hub does not support it.
    pub fn from_hz(hz: u32) -> Option<FrequencySetting> {
        match hz {
            50 => Some(FrequencySetting::Hz50),
            100 => Some(FrequencySetting::Hz100),
            250 => Some(FrequencySetting::Hz250),
            500 => Some(FrequencySetting::Hz500),
            600 => Some(FrequencySetting::Hz600),
            _ => None,
        }
    }

    /// Returns the rate in Hz.
    pub fn hz(&self) -> u32 {
        match self {
            FrequencySetting::Hz50 => 50,
            FrequencySetting::Hz100 => 100,
            FrequencySetting::Hz250 => 250,
            FrequencySetting::Hz500 => 500,
            FrequencySetting::Hz600 => 600,
        }
    }

    pub(crate) fn opcode(&self) -> u8 {
        match self {
            FrequencySetting::Hz50 => HUB_OP_FREQ_50HZ,
            FrequencySetting::Hz100 => HUB_OP_FREQ_100HZ,
            FrequencySetting::Hz250 => HUB_OP_FREQ_250HZ,
            FrequencySetting::Hz500 => HUB_OP_FREQ_500HZ,
            FrequencySetting::Hz600 => HUB_OP_FREQ_600HZ,
        }
    }
}

impl fmt::Display for FrequencySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// Raw distance reported by one sensor channel, in millimeters.
///
/// The value is passed through untouched. Devices report 0 or `u16::MAX`
/// when no target is in range.
pub type RangeReading = u16;

/// The readings of all eight channels decoded from one telemetry frame.
///
/// Index `n` holds channel `n`, whether or not a sensor is plugged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReadingSet {
    readings: [RangeReading; HUB_CHANNEL_COUNT],
}

impl SensorReadingSet {
    /// Wraps eight raw readings.
    pub fn new(readings: [RangeReading; HUB_CHANNEL_COUNT]) -> SensorReadingSet {
        SensorReadingSet { readings }
    }

    /// Returns the reading of `channel`, or `None` past the last channel.
    #[inline]
    pub fn get(&self, channel: usize) -> Option<RangeReading> {
        self.readings.get(channel).copied()
    }

    /// All eight readings in channel order.
    #[inline]
    pub fn as_slice(&self) -> &[RangeReading] {
        &self.readings
    }

    /// Iterates the readings in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &RangeReading> {
        self.readings.iter()
    }

    /// The readings of the first `sensor_count` channels.
    ///
    /// The frame layout never changes with the number of attached sensors;
    /// this only narrows what is surfaced. Counts above eight are capped.
    pub fn active(&self, sensor_count: usize) -> &[RangeReading] {
        &self.readings[..sensor_count.min(HUB_CHANNEL_COUNT)]
    }

    /// Consumes the set, returning the raw array.
    pub fn into_inner(self) -> [RangeReading; HUB_CHANNEL_COUNT] {
        self.readings
    }
}

impl Index<usize> for SensorReadingSet {
    type Output = RangeReading;

    fn index(&self, channel: usize) -> &RangeReading {
        &self.readings[channel]
    }
}

impl From<[RangeReading; HUB_CHANNEL_COUNT]> for SensorReadingSet {
    fn from(readings: [RangeReading; HUB_CHANNEL_COUNT]) -> Self {
        SensorReadingSet::new(readings)
    }
}

/// Lifecycle state of a `Session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No transport handle is held.
    Closed,
    /// The transport is open but the hub is not streaming.
    Open,
    /// The hub has been told to stream and its output rate is set.
    Streaming,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Closed => "closed",
            SessionState::Open => "open",
            SessionState::Streaming => "streaming",
        };
        f.write_str(name)
    }
}
