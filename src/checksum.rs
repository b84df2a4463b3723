//! Thin wrapper around the `crc32fast` crate providing the CRC-32 API used by
//! the gzip engine (IEEE polynomial, as carried in the gzip trailer and the
//! optional FHCRC header field).

pub use crc32fast::Hasher as Crc32State;

/// One-shot CRC-32.
///
/// # Reference vectors
/// * `crc32_oneshot(b"")` == `0x0000_0000`
/// * `crc32_oneshot(b"123456789")` == `0xCBF4_3926`
#[inline]
pub fn crc32_oneshot(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Low 16 bits of the CRC-32 of `header`, the value stored in a gzip FHCRC field.
#[inline]
pub fn header_crc16(header: &[u8]) -> u16 {
    (crc32_oneshot(header) & 0xFFFF) as u16
}
