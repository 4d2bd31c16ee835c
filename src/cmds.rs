// Command frame layout: [address, command, length, opcode, crc8]

/// Leading address byte of every command frame.
pub const HUB_CMD_ADDRESS: u8 = 0x00;

/// Command byte shared by all streaming and output-rate commands.
pub const HUB_CMD_SET: u8 = 0x52;

/// Total size of a command frame in bytes.
pub const HUB_CMD_FRAME_SIZE: usize = 5;

// Streaming control (length 0x02)

/// Length byte used by the streaming control commands.
pub const HUB_CMD_LEN_STREAMING: u8 = 0x02;

/// Opcode that stops the hub from streaming telemetry frames.
pub const HUB_OP_DEACTIVATE_STREAMING: u8 = 0x00;

/// Opcode that makes the hub stream telemetry frames continuously.
pub const HUB_OP_ACTIVATE_STREAMING: u8 = 0x01;

// Output rate (length 0x03)

/// Length byte used by the output-rate commands.
pub const HUB_CMD_LEN_FREQUENCY: u8 = 0x03;

/// Opcode selecting a 50 Hz output rate.
pub const HUB_OP_FREQ_50HZ: u8 = 0x02;

/// Opcode selecting a 100 Hz output rate.
pub const HUB_OP_FREQ_100HZ: u8 = 0x03;

/// Opcode selecting a 250 Hz output rate.
pub const HUB_OP_FREQ_250HZ: u8 = 0x04;

/// Opcode selecting a 500 Hz output rate.
pub const HUB_OP_FREQ_500HZ: u8 = 0x05;

/// Opcode selecting a 600 Hz output rate.
pub const HUB_OP_FREQ_600HZ: u8 = 0x06;

// Telemetry frames

/// Size in bytes of one telemetry frame.
pub const HUB_FRAME_SIZE: usize = 20;

/// Number of sensor channels carried by every telemetry frame.
pub const HUB_CHANNEL_COUNT: usize = 8;

/// Offset of the first channel reading inside a telemetry frame.
pub const HUB_FRAME_DATA_OFFSET: usize = 2;

/// Size in bytes of one channel reading (big-endian u16).
pub const HUB_FRAME_READING_SIZE: usize = 2;

/// Offset of the trailing checksum byte inside a telemetry frame.
pub const HUB_FRAME_CHECKSUM_OFFSET: usize = HUB_FRAME_SIZE - 1;
