//! Decompression engine interface and its gzip implementation.
//!
//! The driver only talks to the [`Engine`] trait. [`InflateEngine`] is the
//! production engine: gzip header parsing, raw inflate via `miniz_oxide`,
//! and CRC-32 verification.

pub mod header;
pub mod inflate;
pub mod types;

pub use header::{parse_gzip_header, GzipHeader};
pub use inflate::InflateEngine;
pub use types::{DecompressionState, Engine, EngineError, EngineResult, EngineStatus};
