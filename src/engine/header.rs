//! Gzip container header (RFC 1952) parsing.
//!
//! Only what the driver and the CLI need is extracted: the flag byte, MTIME,
//! XFL, OS, and the optional EXTRA / NAME / COMMENT fields. When FHCRC is
//! set, the stored 16-bit header CRC is verified.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::checksum::header_crc16;
use crate::engine::types::EngineError;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// Compression method 8 = deflate, the only one defined.
pub const CM_DEFLATE: u8 = 8;
/// Fixed part of the header: magic, CM, FLG, MTIME, XFL, OS.
pub const GZIP_HEADER_MIN: usize = 10;
/// Size of the trailing ISIZE field read by the size oracle.
pub const ISIZE_SIZE: usize = 4;
/// Size of the CRC-32 field that precedes ISIZE.
pub const CRC_SIZE: usize = 4;

pub const FTEXT: u8 = 0x01;
pub const FHCRC: u8 = 0x02;
pub const FEXTRA: u8 = 0x04;
pub const FNAME: u8 = 0x08;
pub const FCOMMENT: u8 = 0x10;
/// Bits 5..7 of FLG must be zero.
pub const FRESERVED: u8 = 0xE0;

// ─────────────────────────────────────────────────────────────────────────────
// GzipHeader
// ─────────────────────────────────────────────────────────────────────────────

/// Fields of a parsed gzip member header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GzipHeader {
    pub flags: u8,
    /// Modification time of the original file, seconds since the epoch (0 = none).
    pub mtime: u32,
    pub xfl: u8,
    pub os: u8,
    pub extra: Option<Vec<u8>>,
    /// Original file name, without the terminating NUL.
    pub name: Option<Vec<u8>>,
    pub comment: Option<Vec<u8>>,
    /// Stored FHCRC value, when present (already verified).
    pub header_crc: Option<u16>,
    /// Number of bytes the header occupies, including optional fields.
    pub header_len: usize,
}

impl GzipHeader {
    #[inline]
    pub fn is_text(&self) -> bool {
        self.flags & FTEXT != 0
    }

    /// MTIME as a `SystemTime`, or `None` when the field is zero.
    pub fn modified(&self) -> Option<SystemTime> {
        if self.mtime == 0 {
            return None;
        }
        UNIX_EPOCH.checked_add(Duration::from_secs(u64::from(self.mtime)))
    }

    /// Lossy UTF-8 view of the stored file name.
    pub fn name_lossy(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(|n| String::from_utf8_lossy(n).into_owned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────────────────────────────────────

/// Parses the gzip header at the start of `src`.
///
/// # Errors
/// - [`EngineError::Truncated`] if `src` ends inside the header.
/// - [`EngineError::Data`] for a wrong magic, a method other than deflate,
///   or a reserved flag bit.
/// - [`EngineError::Checksum`] if FHCRC is set and does not match.
pub fn parse_gzip_header(src: &[u8]) -> Result<GzipHeader, EngineError> {
    if src.len() < GZIP_HEADER_MIN {
        return Err(EngineError::Truncated);
    }
    if src[..2] != GZIP_MAGIC || src[2] != CM_DEFLATE {
        return Err(EngineError::Data);
    }
    let flags = src[3];
    if flags & FRESERVED != 0 {
        return Err(EngineError::Data);
    }

    let mut hdr = GzipHeader {
        flags,
        mtime: u32::from_le_bytes([src[4], src[5], src[6], src[7]]),
        xfl: src[8],
        os: src[9],
        ..GzipHeader::default()
    };
    let mut pos = GZIP_HEADER_MIN;

    if flags & FEXTRA != 0 {
        let xlen_bytes = src.get(pos..pos + 2).ok_or(EngineError::Truncated)?;
        let xlen = usize::from(u16::from_le_bytes([xlen_bytes[0], xlen_bytes[1]]));
        pos += 2;
        let extra = src.get(pos..pos + xlen).ok_or(EngineError::Truncated)?;
        hdr.extra = Some(extra.to_vec());
        pos += xlen;
    }
    if flags & FNAME != 0 {
        let (name, next) = read_zero_terminated(src, pos)?;
        hdr.name = Some(name.to_vec());
        pos = next;
    }
    if flags & FCOMMENT != 0 {
        let (comment, next) = read_zero_terminated(src, pos)?;
        hdr.comment = Some(comment.to_vec());
        pos = next;
    }
    if flags & FHCRC != 0 {
        let stored = src.get(pos..pos + 2).ok_or(EngineError::Truncated)?;
        let stored = u16::from_le_bytes([stored[0], stored[1]]);
        if header_crc16(&src[..pos]) != stored {
            return Err(EngineError::Checksum);
        }
        hdr.header_crc = Some(stored);
        pos += 2;
    }

    hdr.header_len = pos;
    Ok(hdr)
}

/// Returns the bytes before the next NUL at or after `pos`, and the index past it.
fn read_zero_terminated(src: &[u8], pos: usize) -> Result<(&[u8], usize), EngineError> {
    let rest = src.get(pos..).ok_or(EngineError::Truncated)?;
    let nul = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(EngineError::Truncated)?;
    Ok((&rest[..nul], pos + nul + 1))
}
