//! Driver-level types: the session error taxonomy, the session stage
//! machine, and the summary handed to the outcome reporter.

use core::fmt;

use crate::engine::{EngineError, GzipHeader};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why an input was rejected before any engine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Fewer than 4 bytes: there is no length trailer to read.
    TooShort { len: usize },
    /// The trailer declares more output than the configured maximum.
    DeclaredTooLarge { declared: u32, max: u64 },
}

/// Terminal failure of one decompression session.
///
/// ```text
///   DriverError
///   ├── MalformedInput(kind)         ← no trailer, or trailer over the cap
///   ├── AllocationFailure            ← output buffer could not be reserved
///   ├── HeaderError(EngineError)     ← container header rejected
///   ├── DecompressionError(EngineError) ← corrupt block, CRC, truncation
///   └── IncompleteOutput             ← budget spent without reaching Done
/// ```
///
/// None of these is retried; the session ends at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    MalformedInput(MalformedKind),
    AllocationFailure { requested: u64 },
    HeaderError(EngineError),
    DecompressionError(EngineError),
    /// The engine kept reporting `Ok` until the output budget ran out.
    ///
    /// Kept apart from `DecompressionError` because no engine code exists
    /// for it: it exits with status 1, not a negated engine code. Use
    /// [`is_stream_failure`](Self::is_stream_failure) to treat both alike.
    IncompleteOutput { produced: usize, capacity: usize },
}

impl DriverError {
    /// Engine result code behind this error, if the engine produced one.
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            DriverError::HeaderError(e) | DriverError::DecompressionError(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Process exit status: the negated engine code when there is one, else 1.
    pub fn exit_status(&self) -> i32 {
        match self.engine_code() {
            Some(code) if code < 0 => -code,
            _ => 1,
        }
    }

    /// `true` for failures raised while the engine was producing output.
    pub fn is_stream_failure(&self) -> bool {
        matches!(
            self,
            DriverError::DecompressionError(_) | DriverError::IncompleteOutput { .. }
        )
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::MalformedInput(MalformedKind::TooShort { len }) => {
                write!(f, "file too small ({len} bytes, need at least 4)")
            }
            DriverError::MalformedInput(MalformedKind::DeclaredTooLarge { declared, max }) => {
                write!(f, "declared length {declared} exceeds limit {max}")
            }
            DriverError::AllocationFailure { requested } => {
                write!(f, "memory: cannot allocate {requested} bytes")
            }
            DriverError::HeaderError(e) => write!(f, "Error parsing header: {} ({e})", e.code()),
            DriverError::DecompressionError(e) => {
                write!(f, "Error during decompression: {} ({e})", e.code())
            }
            DriverError::IncompleteOutput { produced, capacity } => write!(
                f,
                "Error during decompression: stream not finished after {produced} of {capacity} bytes"
            ),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::HeaderError(e) | DriverError::DecompressionError(e) => Some(e),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session stage
// ─────────────────────────────────────────────────────────────────────────────

/// Position of a session in `Init → HeaderParsed → Decompressing → {Done, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    Init,
    HeaderParsed,
    Decompressing,
    Done,
    Failed,
}

impl SessionStage {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStage::Done | SessionStage::Failed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session summary
// ─────────────────────────────────────────────────────────────────────────────

/// What a successful session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Trailer value; the sink receives exactly this many bytes.
    pub declared_length: u32,
    /// Output buffer size (declared length plus guard).
    pub capacity: usize,
    /// `dest - dest_start` when the engine signalled `Done`.
    pub produced: usize,
    /// Number of engine calls made in the decompress loop.
    pub chunks: usize,
    /// Compressed bytes read, header and CRC included.
    pub consumed: usize,
    pub header: Option<GzipHeader>,
}

impl SessionReport {
    /// `true` when the measured size equals the trailer's claim.
    #[inline]
    pub fn length_matches(&self) -> bool {
        self.produced == self.declared_length as usize
    }
}

/// Output buffer and summary of a successful session.
#[derive(Debug)]
pub struct Decompressed {
    pub(crate) buffer: Vec<u8>,
    pub(crate) report: SessionReport,
}

impl Decompressed {
    /// The sink view: the first `declared_length` bytes of the buffer.
    pub fn output(&self) -> &[u8] {
        &self.buffer[..self.report.declared_length as usize]
    }

    /// Bytes the engine actually produced.
    pub fn produced(&self) -> &[u8] {
        &self.buffer[..self.report.produced]
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Consumes the result, keeping only the sink view.
    pub fn into_output(mut self) -> Vec<u8> {
        self.buffer.truncate(self.report.declared_length as usize);
        self.buffer
    }
}
