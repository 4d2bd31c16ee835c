const CRC8_POLYNOMIAL: u8 = 0x07;

/// Calculates the CRC-8 (polynomial 0x07, initial value 0) used by the hub protocol.
///
/// The same checksum closes every command frame and, on devices that supply one,
/// the last byte of each telemetry frame.
pub struct Checksum {
    current: u8,
}

impl Checksum {
    /// Creates a new `Checksum` instance, initialized to 0.
    #[inline]
    pub fn new() -> Checksum {
        Checksum { current: 0 }
    }

    /// Includes a slice of bytes in the checksum calculation.
    ///
    /// # Arguments
    ///
    /// * `data` - The byte slice to feed into the running CRC.
    #[inline]
    pub fn push_slice(&mut self, data: &[u8]) {
        for d in data {
            self.current ^= d;
            for _ in 0..8 {
                self.current = if self.current & 0x80 != 0 {
                    (self.current << 1) ^ CRC8_POLYNOMIAL
                } else {
                    self.current << 1
                };
            }
        }
    }

    /// Returns the calculated checksum value.
    #[inline]
    pub fn checksum(&self) -> u8 {
        self.current
    }
}

/// One-shot CRC-8 over `data`.
#[inline]
pub fn crc8(data: &[u8]) -> u8 {
    let mut checksum = Checksum::new();
    checksum.push_slice(data);
    checksum.checksum()
}
