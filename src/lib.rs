//! Adler-32 over a sliding window.
//!
//! [`RollingAdler32`] reports, after every byte, the Adler-32 (RFC 1950) value of the last
//! `window_size` bytes it was fed, updating in constant time per byte.
//!
//! ```
//! use rollsum::{checksum, RollingAdler32, RollingChecksum};
//!
//! let data = b"a stream longer than its window";
//! let mut rolling = RollingAdler32::new(8).unwrap();
//! rolling.roll_bytes(data);
//!
//! assert_eq!(rolling.checksum(), checksum(&data[data.len() - 8..]));
//! ```

pub mod error;
pub mod rolling_checksum;

pub use error::{Error, Result};
pub use rolling_checksum::rolling_adler32::RollingAdler32;
pub use rolling_checksum::RollingChecksum;

/// The largest prime below 65536; both Adler-32 sums are kept modulo this value.
pub const MOD: u32 = 65521;

/// Length of a serialized digest in bytes.
pub const SIZE: usize = 4;

/// Input granularity of the checksum in bytes.
pub const BLOCK_SIZE: usize = 1;

/// Every `u32` window fits, the update arithmetic is carried in `u64`.
pub const MAX_WINDOW_SIZE: u32 = u32::MAX;

///
/// Plain (non-rolling) Adler-32 of a whole buffer
///
/// ```
/// assert_eq!(rollsum::checksum(b""), 1);
/// assert_eq!(rollsum::checksum(b"Wikipedia"), 0x11E6_0398);
/// ```
pub fn checksum(data: &[u8]) -> u32 {
    adler32::RollingAdler32::from_buffer(data).hash()
}
