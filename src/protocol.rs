//! Encoding of hub commands and decoding of telemetry frames.
//!
//! Both halves are pure: they never touch a transport and keep no state.

use crate::base::{CommandFrame, Error, Result};
use crate::checksum::crc8;
use crate::cmds::*;
use crate::types::{FrequencySetting, RangeReading, SensorReadingSet};
use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace, warn};

/// Returns the command that makes the hub stream telemetry frames.
pub fn encode_activate_streaming() -> CommandFrame {
    CommandFrame::new(HUB_CMD_LEN_STREAMING, HUB_OP_ACTIVATE_STREAMING)
}

/// Returns the command that stops the telemetry stream.
pub fn encode_deactivate_streaming() -> CommandFrame {
    CommandFrame::new(HUB_CMD_LEN_STREAMING, HUB_OP_DEACTIVATE_STREAMING)
}

/// Returns the command selecting the output rate.
///
/// `None` selects 50 Hz, so the hub always ends up at a known rate.
pub fn encode_frequency(freq: Option<FrequencySetting>) -> CommandFrame {
    let freq = freq.unwrap_or_else(|| {
        debug!("No frequency specified, using {}", FrequencySetting::Hz50);
        FrequencySetting::Hz50
    });
    trace!("Encoding output rate {}", freq);
    CommandFrame::new(HUB_CMD_LEN_FREQUENCY, freq.opcode())
}

/// Returns the command selecting the output rate given in Hz.
///
/// Anything other than 50, 100, 250, 500 or 600 selects 50 Hz instead of failing.
pub fn encode_frequency_hz(hz: Option<u32>) -> CommandFrame {
    match hz {
        None => encode_frequency(None),
        Some(hz) => match FrequencySetting::from_hz(hz) {
            Some(freq) => encode_frequency(Some(freq)),
            None => {
                warn!(
                    "Unsupported frequency {} Hz, using {}",
                    hz,
                    FrequencySetting::Hz50
                );
                encode_frequency(Some(FrequencySetting::Hz50))
            }
        },
    }
}

/// Decodes one telemetry frame into the readings of all eight channels.
///
/// Bytes 0-1 are the frame header, channel `n` is the big-endian `u16` at
/// offset `2 + 2n`, and bytes 18-19 are trailer bytes that are not decoded.
/// Fails with `Error::FrameLength` unless `frame` is exactly 20 bytes long.
pub fn decode(frame: &[u8]) -> Result<SensorReadingSet> {
    trace!("Decoding telemetry frame: {:02X?}", frame);
    if frame.len() != HUB_FRAME_SIZE {
        return Err(Error::FrameLength {
            expected: HUB_FRAME_SIZE,
            actual: frame.len(),
        });
    }

    let mut readings: [RangeReading; HUB_CHANNEL_COUNT] = [0; HUB_CHANNEL_COUNT];
    for (channel, reading) in readings.iter_mut().enumerate() {
        let offset = HUB_FRAME_DATA_OFFSET + channel * HUB_FRAME_READING_SIZE;
        *reading = BigEndian::read_u16(&frame[offset..offset + HUB_FRAME_READING_SIZE]);
    }
    Ok(SensorReadingSet::new(readings))
}

/// Like `decode`, but first checks that the last byte is the CRC-8 of the 19 bytes before it.
pub fn decode_verified(frame: &[u8]) -> Result<SensorReadingSet> {
    if frame.len() != HUB_FRAME_SIZE {
        return Err(Error::FrameLength {
            expected: HUB_FRAME_SIZE,
            actual: frame.len(),
        });
    }
    verify_frame_checksum(frame)?;
    decode(frame)
}

fn verify_frame_checksum(frame: &[u8]) -> Result<()> {
    let expected = crc8(&frame[..HUB_FRAME_CHECKSUM_OFFSET]);
    let actual = frame[HUB_FRAME_CHECKSUM_OFFSET];
    if expected != actual {
        return Err(Error::Checksum { expected, actual });
    }
    Ok(())
}
