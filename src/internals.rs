use std::time::Duration;

/// Default baud rate of the hub's serial link.
pub const HUB_DEFAULT_BAUD_RATE: u32 = 921_600;

/// Default time a single frame read may block before giving up.
pub const HUB_DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause after every command before the hub reliably accepts the next one.
pub const HUB_DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Number of sensors surfaced to the caller unless configured otherwise.
pub const HUB_DEFAULT_SENSOR_COUNT: usize = 4;
