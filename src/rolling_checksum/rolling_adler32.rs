use std::io::{self, Read, Write};

use log::{debug, trace};

use super::RollingChecksum;
use crate::error::{Error, Result};
use crate::{BLOCK_SIZE, MOD, SIZE};

const MODULUS: u64 = MOD as u64;

/// Adler-32 of the last `window_size` bytes fed into it.
///
/// The window is a fixed ring buffer: `position` is the slot to overwrite next, so it also
/// holds the byte about to be evicted. Slots that were never written are zero and evict
/// as a zero contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollingAdler32 {
    window_size: u32,
    window: Box<[u8]>,
    position: usize,
    // set once `position` wraps for the first time; only `reset` clears it
    filled: bool,
    s1: u32,
    s2: u32,
}

impl RollingAdler32 {
    pub fn new(window_size: u32) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidConfiguration { window_size });
        }
        debug!("rolling adler32 with a window of {} bytes", window_size);

        Ok(RollingAdler32 {
            window_size,
            window: vec![0; window_size as usize].into_boxed_slice(),
            position: 0,
            filled: false,
            s1: 1,
            s2: 0,
        })
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// The checksum in network byte order.
    pub fn digest(&self) -> [u8; SIZE] {
        self.checksum().to_be_bytes()
    }

    pub fn append_digest(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.digest());
    }

    /// Rolls everything `reader` yields until EOF, returning the number of bytes consumed.
    pub fn roll_reader<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        io::copy(reader, self)
    }
}

impl RollingChecksum for RollingAdler32 {
    type ChecksumType = u32;

    fn window_size(&self) -> u32 {
        self.window_size
    }

    fn checksum(&self) -> Self::ChecksumType {
        (self.s2 << 16) | self.s1
    }

    fn roll_byte(&mut self, new_byte: u8) {
        let evicted = u64::from(self.window[self.position]);
        let window_size = u64::from(self.window_size);

        // subtractions are done by adding the complement, every term stays below 4 * MOD
        let s1 = (u64::from(self.s1) + u64::from(new_byte) + MODULUS - evicted) % MODULUS;
        let mut s2 = u64::from(self.s2) + s1 + MODULUS - (window_size * evicted) % MODULUS;
        if self.filled {
            // a full window drops one of the "+1 per byte" terms along with the evicted byte
            s2 += MODULUS - 1;
        }

        self.s1 = s1 as u32;
        self.s2 = (s2 % MODULUS) as u32;

        self.window[self.position] = new_byte;
        self.position += 1;
        if self.position == self.window.len() {
            self.position = 0;
            self.filled = true;
        }
    }

    fn reset(&mut self) {
        trace!("resetting rolling adler32 with a window of {} bytes", self.window_size);
        self.window.fill(0);
        self.position = 0;
        self.filled = false;
        self.s1 = 1;
        self.s2 = 0;
    }
}

impl Write for RollingAdler32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.roll_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
