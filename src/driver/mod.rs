//! Decompression orchestration for one complete in-memory gzip object.
//!
//! ```text
//!   compressed bytes
//!     → oracle   (declared length from the 4-byte trailer)
//!     → planner  (cap it, add the guard, allocate)
//!     → chunked  (header parse, bounded engine calls)
//!     → report   (messages, exit status, sink hand-off)
//! ```
//!
//! [`decompress`] runs the whole pipeline with the gzip [`InflateEngine`];
//! [`decompress_using`] accepts any [`Engine`].

pub mod chunked;
pub mod oracle;
pub mod planner;
pub mod report;
pub mod types;

pub use chunked::ChunkedDriver;
pub use types::{Decompressed, DriverError, MalformedKind, SessionReport, SessionStage};

use crate::config::DriverConfig;
use crate::displaylevel;
use crate::engine::{Engine, InflateEngine};

/// Decompresses a complete gzip object with the default engine.
pub fn decompress(object: &[u8], cfg: &DriverConfig) -> Result<Decompressed, DriverError> {
    let engine = InflateEngine::init(None).map_err(DriverError::DecompressionError)?;
    decompress_using(engine, object, cfg)
}

/// Decompresses `object` with an already-initialised engine.
///
/// The trailer is read and validated before anything is allocated, so a
/// malformed or over-cap object never reaches the planner's allocation.
pub fn decompress_using<E: Engine>(
    engine: E,
    object: &[u8],
    cfg: &DriverConfig,
) -> Result<Decompressed, DriverError> {
    let declared = oracle::declared_length(object)?;
    displaylevel!(2, "decompressed length: {} bytes\n", declared);

    let plan = planner::plan_output(declared, cfg)?;
    let mut buffer = planner::allocate(&plan)?;

    let report = {
        let mut driver = ChunkedDriver::new(engine, object, &mut buffer, cfg)?;
        driver.run()?;
        driver.report(declared)
    };
    Ok(Decompressed { buffer, report })
}
