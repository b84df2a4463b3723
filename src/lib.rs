// gzchunk — bounded, chunked decompression of in-memory gzip objects

pub mod checksum;
pub mod cli;
pub mod config;
pub mod driver;
pub mod engine;
pub mod io;

// ── Version constants ─────────────────────────────────────────────────────────
pub const GZCHUNK_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    GZCHUNK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::DriverConfig;
pub use driver::{decompress, decompress_using, Decompressed, DriverError, SessionReport};
pub use engine::{Engine, EngineError, EngineStatus, InflateEngine};
