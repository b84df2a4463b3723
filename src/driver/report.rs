//! Outcome reporter: user-visible messages, exit status, and hand-off of
//! the output window to the sink.
//!
//! The sink always receives the trailer's declared length, not the measured
//! one. The engine is trusted for the bytes inside that window; the trailer
//! decides where the window ends. A disagreement between the two is
//! reported as a warning and does not change what is written.

use std::io::{self, Write};

use crate::driver::types::{Decompressed, DriverError};
use crate::{display, displaylevel};

/// Exit status for a session result: 0 on success, otherwise derived from
/// the failing engine code (see [`DriverError::exit_status`]).
pub fn exit_status(result: &Result<Decompressed, DriverError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_status(),
    }
}

/// Prints the outcome of a session.
///
/// Success goes out at level 2, a length mismatch warning at level 2, the
/// per-session detail at level 3. Errors are printed at level 1.
pub fn report_outcome(result: &Result<Decompressed, DriverError>) {
    match result {
        Ok(d) => {
            let rep = d.report();
            displaylevel!(2, "decompressed {} bytes\n", rep.produced);
            if !rep.length_matches() {
                displaylevel!(
                    2,
                    "warning: stream produced {} bytes but trailer declares {}; keeping {}\n",
                    rep.produced,
                    rep.declared_length,
                    rep.declared_length
                );
            }
            displaylevel!(
                3,
                "{} engine calls, {} compressed bytes read, buffer {} bytes\n",
                rep.chunks,
                rep.consumed,
                rep.capacity
            );
            if let Some(name) = rep.header.as_ref().and_then(|h| h.name_lossy()) {
                displaylevel!(3, "original name: {}\n", name);
            }
        }
        Err(e) => {
            if crate::cli::constants::display_level() >= 1 {
                display!("ERROR: {}\n", e);
            }
        }
    }
}

/// Writes the sink view of a successful session to `sink`.
///
/// Only a [`Decompressed`] value can be delivered, so a failed session can
/// never leak partial output. Returns the number of bytes written.
pub fn deliver<W: Write>(decompressed: &Decompressed, sink: &mut W) -> io::Result<usize> {
    let out = decompressed.output();
    sink.write_all(out)?;
    sink.flush()?;
    Ok(out.len())
}
