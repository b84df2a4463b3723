//! Binary entry point for the `gzchunk` command-line tool.
//!
//! # Control flow
//!
//! 1. Parse arguments and set the display level.
//! 2. Build the [`DriverConfig`] from the environment, then the flags.
//! 3. Load the whole source, run one decompression session.
//! 4. Report; on success open the sink and write the declared-length window.
//!
//! Exit status is 0 on success. A failing engine code `c` exits with `-c`;
//! every other failure exits with 1.

use anyhow::Context;
use clap::Parser;

use gzchunk::cli::constants::{set_display_level, PROGRAM_NAME, WELCOME_MESSAGE};
use gzchunk::cli::Args;
use gzchunk::driver::report::{deliver, exit_status, report_outcome};
use gzchunk::io::{open_sink, read_source, restore_mtime};
use gzchunk::{displaylevel, end_process, DriverConfig};

fn run(args: &Args) -> anyhow::Result<i32> {
    let cfg = DriverConfig::from_env().context("environment")?;
    let cfg = args.driver_config(cfg).context("bad usage")?;
    displaylevel!(
        4,
        "chunk size {} bytes, guard {} bytes, max output {} bytes\n",
        cfg.chunk_size(),
        cfg.guard_bytes(),
        cfg.max_output_size()
    );

    let input = read_source(&args.source).with_context(|| format!("source file {}", args.source))?;

    let result = gzchunk::decompress(&input, &cfg);
    report_outcome(&result);
    let status = exit_status(&result);
    let Ok(decompressed) = result else {
        return Ok(status);
    };

    if args.test {
        displaylevel!(2, "{}: OK\n", args.source);
        return Ok(0);
    }
    let Some(dst) = args.destination.as_deref() else {
        return Ok(0);
    };

    let mut sink = open_sink(dst, args.force).with_context(|| format!("destination file {dst}"))?;
    deliver(&decompressed, &mut sink).with_context(|| format!("write {dst}"))?;
    drop(sink);

    if args.restore_mtime {
        restore_mtime(dst, decompressed.report().header.as_ref())
            .with_context(|| format!("set modification time on {dst}"))?;
    }
    Ok(0)
}

fn main() {
    let args = Args::parse();
    set_display_level(args.display_level());
    displaylevel!(
        3,
        "{} v{} - {}\n\n",
        PROGRAM_NAME,
        gzchunk::version_string(),
        WELCOME_MESSAGE
    );

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => end_process!(1, "{:#}", e),
    }
}
