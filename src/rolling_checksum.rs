pub mod rolling_adler32;

pub trait RollingChecksum {
    type ChecksumType;

    fn window_size(&self) -> u32;
    fn checksum(&self) -> Self::ChecksumType;

    /// Pushes `new_byte` into the window, evicting the oldest byte once the window is full.
    fn roll_byte(&mut self, new_byte: u8);

    fn roll_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.roll_byte(byte);
        }
    }

    fn reset(&mut self);
}
