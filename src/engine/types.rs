//! Engine-facing types: result codes, the error taxonomy, the shared
//! decompression-state record, and the [`Engine`] trait the driver consumes.
//!
//! Covers:
//! - `EngineStatus` — the two non-error result codes (`Ok`, `Done`)
//! - `EngineError` — engine failure kinds with stable numeric codes
//! - `DecompressionState` — bounds-checked source/destination cursors
//! - `Engine` — init / header parse / chunked decompress interface

use core::fmt;

use crate::engine::header::GzipHeader;

// ─────────────────────────────────────────────────────────────────────────────
// Numeric result codes
// ─────────────────────────────────────────────────────────────────────────────

/// Chunk boundary reached, more output expected.
pub const CODE_OK: i32 = 0;
/// Stream logically complete and verified.
pub const CODE_DONE: i32 = 1;
/// Malformed header or block, or input ended mid-stream.
pub const CODE_DATA_ERROR: i32 = -3;
/// CRC-32 mismatch (trailer or FHCRC).
pub const CODE_CHECKSUM_ERROR: i32 = -4;
/// Unusable dictionary / window configuration.
pub const CODE_DICT_ERROR: i32 = -5;

/// Non-error outcome of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// The destination limit was reached; call again with a fresh window.
    Ok,
    /// The compressed stream ended and its checksum matched.
    Done,
}

impl EngineStatus {
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            EngineStatus::Ok => CODE_OK,
            EngineStatus::Done => CODE_DONE,
        }
    }
}

/// Failure kinds reported by an engine. Every one of them is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid header field, invalid block type, bad Huffman table, or a
    /// back-reference past the start of output.
    Data,
    /// The source ran out before the stream (or its CRC) was complete.
    /// Reported under the data-error code.
    Truncated,
    /// CRC-32 of the produced bytes (or of the header) did not match.
    Checksum,
    /// The engine cannot work with the supplied dictionary.
    Dictionary,
}

impl EngineError {
    /// Stable numeric code; negative for every error kind.
    pub fn code(self) -> i32 {
        match self {
            EngineError::Data | EngineError::Truncated => CODE_DATA_ERROR,
            EngineError::Checksum => CODE_CHECKSUM_ERROR,
            EngineError::Dictionary => CODE_DICT_ERROR,
        }
    }

    pub fn error_name(self) -> &'static str {
        match self {
            EngineError::Data => "data error",
            EngineError::Truncated => "unexpected end of input",
            EngineError::Checksum => "checksum mismatch",
            EngineError::Dictionary => "dictionary error",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for EngineError {}

/// Result of a single engine call.
pub type EngineResult = Result<EngineStatus, EngineError>;

// ─────────────────────────────────────────────────────────────────────────────
// DecompressionState
// ─────────────────────────────────────────────────────────────────────────────

/// Cursor record shared between the driver and the engine for one session.
///
/// All positions are indices. The record maintains
/// `dest_start <= dest <= dest_limit <= output.len()` and
/// `source <= source_limit <= input.len()`; every advance is checked
/// against its limit and fails with [`EngineError::Data`] rather than
/// moving a cursor out of range.
///
/// The input is fully memory-resident: there is no refill callback, so
/// running out of `[source, source_limit)` is always end of input.
#[derive(Debug)]
pub struct DecompressionState<'a> {
    input: &'a [u8],
    output: &'a mut [u8],
    source: usize,
    source_limit: usize,
    dest: usize,
    dest_start: usize,
    dest_limit: usize,
}

impl<'a> DecompressionState<'a> {
    /// Creates a state reading `input[..source_limit]` and writing into `output`.
    ///
    /// `source_limit` is clamped to `input.len()`. The destination window
    /// starts empty; call [`open_window`](Self::open_window) before the
    /// first decompress call.
    pub fn new(input: &'a [u8], source_limit: usize, output: &'a mut [u8]) -> Self {
        Self {
            input,
            output,
            source: 0,
            source_limit: source_limit.min(input.len()),
            dest: 0,
            dest_start: 0,
            dest_limit: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn source_limit(&self) -> usize {
        self.source_limit
    }

    #[inline]
    pub fn dest(&self) -> usize {
        self.dest
    }

    #[inline]
    pub fn dest_start(&self) -> usize {
        self.dest_start
    }

    #[inline]
    pub fn dest_limit(&self) -> usize {
        self.dest_limit
    }

    /// Total size of the output buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.output.len()
    }

    /// Unread input in `[source, source_limit)`.
    ///
    /// The slice borrows the input, not the state, so an engine can hold it
    /// while it writes through [`window_mut`](Self::window_mut).
    #[inline]
    pub fn pending_input(&self) -> &'a [u8] {
        let input: &'a [u8] = self.input;
        &input[self.source..self.source_limit]
    }

    /// Advances the read cursor by `n` bytes.
    pub fn consume(&mut self, n: usize) -> Result<(), EngineError> {
        let avail = self.source_limit - self.source;
        if n > avail {
            return Err(EngineError::Data);
        }
        self.source += n;
        Ok(())
    }

    /// Marks the current write position as the start of output.
    pub fn begin_output(&mut self) {
        self.dest_start = self.dest;
        self.dest_limit = self.dest;
    }

    /// Sets `dest_limit = dest + chunk`, clamped to the buffer end.
    ///
    /// Returns the width of the window actually opened.
    pub fn open_window(&mut self, chunk: usize) -> usize {
        self.dest_limit = self.dest.saturating_add(chunk).min(self.output.len());
        self.dest_limit - self.dest
    }

    /// Output buffer up to `dest_limit`, plus the write position within it.
    ///
    /// Bytes before the write position are already-produced output and may
    /// be read (back-references); only `[dest, dest_limit)` may be written.
    #[inline]
    pub fn window_mut(&mut self) -> (&mut [u8], usize) {
        (&mut self.output[..self.dest_limit], self.dest)
    }

    /// Advances the write cursor by `n` bytes and returns the bytes just committed.
    pub fn commit(&mut self, n: usize) -> Result<&[u8], EngineError> {
        let room = self.dest_limit - self.dest;
        if n > room {
            return Err(EngineError::Data);
        }
        let from = self.dest;
        self.dest += n;
        Ok(&self.output[from..self.dest])
    }

    /// Bytes produced since [`begin_output`](Self::begin_output).
    #[inline]
    pub fn produced(&self) -> &[u8] {
        &self.output[self.dest_start..self.dest]
    }

    /// `dest - dest_start`.
    #[inline]
    pub fn produced_len(&self) -> usize {
        self.dest - self.dest_start
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine trait
// ─────────────────────────────────────────────────────────────────────────────

/// A decompression engine driven one bounded output window at a time.
///
/// The engine owns its private decode context (inflater tables, running
/// checksum, parsed header). Cursors live in the [`DecompressionState`] the
/// driver passes to every call.
pub trait Engine {
    /// Creates a fresh context. `None` or an empty slice selects
    /// no-dictionary mode.
    fn init(dictionary: Option<&[u8]>) -> Result<Self, EngineError>
    where
        Self: Sized;

    /// Validates the container header at `state.source()` and advances past it.
    fn parse_header(&mut self, state: &mut DecompressionState<'_>) -> EngineResult;

    /// Decompresses into `[state.dest(), state.dest_limit())`, verifying the
    /// checksum once the stream ends.
    fn decompress_chunk(&mut self, state: &mut DecompressionState<'_>) -> EngineResult;

    /// Header fields captured by [`parse_header`](Self::parse_header), if any.
    fn header(&self) -> Option<&GzipHeader> {
        None
    }
}
