use crate::checksum::crc8;
use crate::cmds::{HUB_CMD_ADDRESS, HUB_CMD_FRAME_SIZE, HUB_CMD_SET};
use std::fmt;

/// A single encoded instruction for the hub.
///
/// Every command is exactly five bytes: `[0x00, 0x52, length, opcode, crc8]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandFrame {
    bytes: [u8; HUB_CMD_FRAME_SIZE],
}

impl CommandFrame {
    /// Builds a command frame, appending the CRC-8 of the first four bytes.
    ///
    /// # Arguments
    ///
    /// * `length` - The length byte of the command family.
    /// * `opcode` - The operation selector.
    pub fn new(length: u8, opcode: u8) -> CommandFrame {
        let mut bytes = [HUB_CMD_ADDRESS, HUB_CMD_SET, length, opcode, 0];
        bytes[HUB_CMD_FRAME_SIZE - 1] = crc8(&bytes[..HUB_CMD_FRAME_SIZE - 1]);
        CommandFrame { bytes }
    }

    /// The bytes to put on the wire.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; HUB_CMD_FRAME_SIZE] {
        &self.bytes
    }

    /// The length byte.
    #[inline]
    pub fn length(&self) -> u8 {
        self.bytes[2]
    }

    /// The opcode byte.
    #[inline]
    pub fn opcode(&self) -> u8 {
        self.bytes[3]
    }

    /// The trailing checksum byte.
    #[inline]
    pub fn checksum(&self) -> u8 {
        self.bytes[HUB_CMD_FRAME_SIZE - 1]
    }

    /// Returns `true` if the checksum byte matches the CRC-8 of the rest of the frame.
    pub fn verify(&self) -> bool {
        crc8(&self.bytes[..HUB_CMD_FRAME_SIZE - 1]) == self.checksum()
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandFrame(")?;
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        write!(f, ")")
    }
}
