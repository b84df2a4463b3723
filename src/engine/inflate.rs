//! Gzip engine backed by the `miniz_oxide` core inflater.
//!
//! The inflater runs in non-wrapping mode: the driver's output buffer is the
//! history window, so back-references read straight out of already-produced
//! output and no separate dictionary is needed. Each call is handed the
//! buffer truncated at `dest_limit`, which is what bounds the chunk.
//!
//! CRC-32 is accumulated over every committed chunk and checked against the
//! trailer CRC as soon as the deflate stream reports its end.

use miniz_oxide::inflate::core::{decompress, inflate_flags, DecompressorOxide};
use miniz_oxide::inflate::TINFLStatus;

use crate::checksum::Crc32State;
use crate::engine::header::{parse_gzip_header, GzipHeader, CRC_SIZE};
use crate::engine::types::{DecompressionState, Engine, EngineError, EngineResult, EngineStatus};

/// Raw deflate (gzip framing is handled here, not by the inflater), with the
/// whole input already present and a linear output buffer.
const INFLATE_FLAGS: u32 = inflate_flags::TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;

/// Gzip decompression context: inflater state, running CRC, parsed header.
pub struct InflateEngine {
    inflater: Box<DecompressorOxide>,
    crc: Crc32State,
    header: Option<GzipHeader>,
    finished: bool,
}

impl InflateEngine {
    /// CRC-32 of everything committed so far.
    pub fn running_crc(&self) -> u32 {
        self.crc.clone().finalize()
    }

    /// `true` once the stream ended and its CRC was verified.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reads the CRC-32 that follows the deflate stream and compares it.
    fn verify_trailer_crc(&mut self, state: &mut DecompressionState<'_>) -> EngineResult {
        let pending = state.pending_input();
        if pending.len() < CRC_SIZE {
            return Err(EngineError::Truncated);
        }
        let stored = u32::from_le_bytes([pending[0], pending[1], pending[2], pending[3]]);
        state.consume(CRC_SIZE)?;
        if stored != self.running_crc() {
            return Err(EngineError::Checksum);
        }
        self.finished = true;
        Ok(EngineStatus::Done)
    }
}

impl Engine for InflateEngine {
    /// Only no-dictionary mode exists: history is read from the output
    /// buffer itself. A non-empty dictionary is a [`EngineError::Dictionary`].
    fn init(dictionary: Option<&[u8]>) -> Result<Self, EngineError> {
        if dictionary.is_some_and(|d| !d.is_empty()) {
            return Err(EngineError::Dictionary);
        }
        Ok(Self {
            inflater: Box::default(),
            crc: Crc32State::new(),
            header: None,
            finished: false,
        })
    }

    fn parse_header(&mut self, state: &mut DecompressionState<'_>) -> EngineResult {
        let hdr = parse_gzip_header(state.pending_input())?;
        state.consume(hdr.header_len)?;
        self.header = Some(hdr);
        Ok(EngineStatus::Ok)
    }

    fn decompress_chunk(&mut self, state: &mut DecompressionState<'_>) -> EngineResult {
        if self.finished {
            return Ok(EngineStatus::Done);
        }
        let input = state.pending_input();
        let (status, consumed, written) = {
            let (window, pos) = state.window_mut();
            decompress(&mut self.inflater, input, window, pos, INFLATE_FLAGS)
        };
        state.consume(consumed)?;
        let fresh = state.commit(written)?;
        self.crc.update(fresh);

        match status {
            TINFLStatus::HasMoreOutput => Ok(EngineStatus::Ok),
            TINFLStatus::Done => self.verify_trailer_crc(state),
            TINFLStatus::NeedsMoreInput | TINFLStatus::FailedCannotMakeProgress => {
                Err(EngineError::Truncated)
            }
            TINFLStatus::Adler32Mismatch => Err(EngineError::Checksum),
            TINFLStatus::Failed | TINFLStatus::BadParam => Err(EngineError::Data),
        }
    }

    fn header(&self) -> Option<&GzipHeader> {
        self.header.as_ref()
    }
}
