//! File I/O around a decompression session.
//!
//! - [`read_source`] loads the whole compressed object into memory,
//!   handling the `"stdin"` sentinel and rejecting directories.
//! - [`open_sink`] resolves the destination, handling the `"stdout"` and
//!   null-device sentinels and the overwrite policy.
//! - [`restore_mtime`] copies the gzip header's MTIME onto the output file.
//!
//! The sink is opened only after a session has succeeded, so a failed
//! session leaves no file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::displaylevel;
use crate::engine::GzipHeader;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
fn is_special_sink(path: &str) -> bool {
    path == STDOUT_MARK || path == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Reads the entire compressed object from `path`.
///
/// Input is never streamed: the driver needs the trailer before it can size
/// the output, so the whole object is loaded up front.
pub fn read_source(path: &str) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if path == STDIN_MARK {
        displaylevel!(4, "Using stdin for input\n");
        io::stdin().lock().read_to_end(&mut data)?;
        return Ok(data);
    }

    if fs::metadata(path)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory"),
        ));
    }
    File::open(path)?.read_to_end(&mut data)?;
    displaylevel!(4, "read {} bytes from {}\n", data.len(), path);
    Ok(data)
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Opens the destination for writing.
///
/// - `"stdout"` → standard output.
/// - [`NUL_MARK`] → [`io::sink`], nothing is created.
/// - Otherwise a regular file. When it already exists and `force` is false,
///   the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_sink(path: &str, force: bool) -> io::Result<Box<dyn Write>> {
    if path == STDOUT_MARK {
        displaylevel!(4, "Using stdout for output\n");
        return Ok(Box::new(io::stdout().lock()));
    }
    if path == NUL_MARK {
        return Ok(Box::new(io::sink()));
    }
    if !force && Path::new(path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path}: already exists; not overwritten (use -f)"),
        ));
    }
    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(Box::new(BufWriter::new(f)))
}

/// Sets the modification time of `path` from the header's MTIME.
///
/// Does nothing for sentinel destinations or when the header carries no
/// timestamp. Returns `true` when a timestamp was applied.
pub fn restore_mtime(path: &str, header: Option<&GzipHeader>) -> io::Result<bool> {
    if is_special_sink(path) {
        return Ok(false);
    }
    let Some(modified) = header.and_then(GzipHeader::modified) else {
        return Ok(false);
    };
    filetime::set_file_mtime(path, filetime::FileTime::from_system_time(modified))?;
    Ok(true)
}
