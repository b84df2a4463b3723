//! Round-trip tests over larger payloads and many chunk sizes, plus
//! interoperability with the system `gzip` binary when one is installed.
//!
//! If `gzip` is not found the interop test prints a skip message and returns
//! without failing, so it always appears in the test count.

use std::io::Write;
use std::process::{Command, Stdio};

use flate2::write::GzEncoder;
use flate2::Compression;
use gzchunk::{decompress, DriverConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn gzip_level(payload: &[u8], level: u32) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::new(level));
    enc.write_all(payload).unwrap();
    enc.finish().unwrap()
}

/// Mixed content: repeated phrases interleaved with pseudo-random runs.
fn mixed_corpus(len: usize) -> Vec<u8> {
    let phrase = b"Decompression proceeds one bounded window at a time. ";
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed ^= seed << 7;
        seed ^= seed >> 9;
        if seed % 3 == 0 {
            out.extend((0..(seed % 97) as usize).map(|i| (seed >> (i % 56)) as u8));
        } else {
            out.extend_from_slice(phrase);
        }
    }
    out.truncate(len);
    out
}

fn config(chunk: usize) -> DriverConfig {
    DriverConfig::default().with_chunk_size(chunk).unwrap()
}

/// Path to the system `gzip` binary, or `None` if not found.
fn system_gzip() -> Option<String> {
    let out = Command::new("which").arg("gzip").output().ok()?;
    if !out.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!path.is_empty()).then_some(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_all_levels() {
    let corpus = mixed_corpus(200_000);
    for level in 0..=9 {
        let gz = gzip_level(&corpus, level);
        let d = decompress(&gz, &DriverConfig::default()).unwrap();
        assert_eq!(d.output(), &corpus[..], "level {level}");
        assert!(d.report().length_matches());
    }
}

#[test]
fn test_roundtrip_chunk_sizes() {
    let corpus = mixed_corpus(100_000);
    let gz = gzip_level(&corpus, 6);
    for chunk in [1, 2, 3, 255, 256, 4095, 4096, 32_768, 65_536, 1 << 20] {
        let d = decompress(&gz, &config(chunk)).unwrap();
        assert_eq!(d.output(), &corpus[..], "chunk {chunk}");
        assert!(d.report().chunks >= corpus.len() / chunk);
    }
}

#[test]
fn test_roundtrip_window_sized_payloads() {
    // Sizes straddling the 32 KiB deflate window.
    for len in [32_767, 32_768, 32_769, 65_536] {
        let corpus = mixed_corpus(len);
        let gz = gzip_level(&corpus, 9);
        for chunk in [1000, 32_768] {
            let d = decompress(&gz, &config(chunk)).unwrap();
            assert_eq!(d.output(), &corpus[..], "len {len} chunk {chunk}");
        }
    }
}

#[test]
fn test_into_output_is_declared_window() {
    let corpus = mixed_corpus(10_000);
    let d = decompress(&gzip_level(&corpus, 6), &DriverConfig::default()).unwrap();
    assert_eq!(d.into_output(), corpus);
}

#[test]
fn test_interop_system_gzip() {
    let Some(gzip) = system_gzip() else {
        eprintln!("skipping: system gzip not found");
        return;
    };
    let corpus = mixed_corpus(50_000);
    let mut child = Command::new(gzip)
        .args(["-c", "-9"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(&corpus).unwrap();
    }
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    for chunk in [1, 4096] {
        let d = decompress(&out.stdout, &config(chunk)).unwrap();
        assert_eq!(d.output(), &corpus[..]);
    }
}
