//! Command-line arguments for `gzchunk`.
//!
//! ```text
//! gzchunk [OPTIONS] <SOURCE> [DESTINATION]
//! ```
//!
//! `SOURCE` may be `stdin`, `DESTINATION` may be `stdout`. `DESTINATION` can
//! be omitted only in test mode (`-t`), which decompresses and verifies
//! without writing anything.
//!
//! Tunables start from [`DriverConfig::from_env`] and are overridden by the
//! flags given here.

use clap::{ArgAction, Parser};

use crate::cli::constants::DISPLAY_LEVEL_MAX;
use crate::config::{ConfigError, DriverConfig};

/// Decompress one gzip file held entirely in memory, a bounded chunk at a time.
///
/// Both input and output are kept in memory, so do not use this on huge files.
#[derive(Debug, Parser)]
#[command(name = "gzchunk", version)]
pub struct Args {
    /// Compressed input file (`stdin` reads standard input).
    pub source: String,

    /// Output file (`stdout` writes standard output).
    #[arg(required_unless_present = "test")]
    pub destination: Option<String>,

    /// Output bytes per engine call (1 = byte-by-byte).
    #[arg(short = 'c', long = "chunk-size", value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Refuse inputs whose trailer declares more than this many bytes.
    #[arg(long = "max-size", value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Extra output capacity past the declared length.
    #[arg(long = "guard", value_name = "BYTES")]
    pub guard: Option<usize>,

    /// Overwrite an existing destination.
    #[arg(short, long)]
    pub force: bool,

    /// Decompress and verify only; write nothing.
    #[arg(short, long)]
    pub test: bool,

    /// Set the output file's modification time from the gzip header.
    #[arg(short = 'N', long = "name")]
    pub restore_mtime: bool,

    /// More output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    /// Display level implied by `-v` / `-q`, starting from 2.
    pub fn display_level(&self) -> u32 {
        (2 + u32::from(self.verbose))
            .saturating_sub(u32::from(self.quiet))
            .min(DISPLAY_LEVEL_MAX)
    }

    /// Applies the flag overrides on top of `base`.
    pub fn driver_config(&self, base: DriverConfig) -> Result<DriverConfig, ConfigError> {
        let mut cfg = base;
        if let Some(n) = self.chunk_size {
            cfg = cfg.with_chunk_size(n)?;
        }
        if let Some(n) = self.max_size {
            cfg = cfg.with_max_output_size(n);
        }
        if let Some(n) = self.guard {
            cfg = cfg.with_guard_bytes(n);
        }
        Ok(cfg)
    }
}
