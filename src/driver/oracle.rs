//! Size oracle: the declared uncompressed length from the 4-byte trailer.
//!
//! The value comes from the stream itself and is only a hint. It may be
//! wrong, zero, or (for inputs of 4 GiB and more) reduced modulo 2^32.

use crate::driver::types::{DriverError, MalformedKind};
use crate::engine::header::ISIZE_SIZE;

/// Reads the little-endian `u32` in the last 4 bytes of `object`.
///
/// # Errors
/// `MalformedInput(TooShort)` when `object.len() < 4`.
pub fn declared_length(object: &[u8]) -> Result<u32, DriverError> {
    let at = object
        .len()
        .checked_sub(ISIZE_SIZE)
        .ok_or(DriverError::MalformedInput(MalformedKind::TooShort { len: object.len() }))?;
    let t = &object[at..];
    Ok(u32::from_le_bytes([t[0], t[1], t[2], t[3]]))
}

/// End of the readable payload: everything but the length trailer.
///
/// Callers must have validated the object with [`declared_length`] first.
#[inline]
pub fn payload_limit(object: &[u8]) -> usize {
    object.len().saturating_sub(ISIZE_SIZE)
}
