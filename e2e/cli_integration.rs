// e2e/cli_integration.rs — CLI integration tests
//
// Runs the `gzchunk` binary as a black box with std::process::Command.
// Covers the decompress path, overwrite policy, test mode, exit codes for
// each failure class, header MTIME restoration, and the stdout sentinel.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use tempfile::TempDir;

/// Locate the `gzchunk` binary produced by Cargo.
fn gzchunk_bin() -> PathBuf {
    // CARGO_BIN_EXE_gzchunk is set by Cargo when building integration tests.
    if let Some(p) = option_env!("CARGO_BIN_EXE_gzchunk") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("gzchunk");
    p
}

fn gzip(payload: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(payload).unwrap();
    enc.finish().unwrap()
}

/// Writes `bytes` as `name` inside a fresh TempDir.
fn temp_file(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    (dir, path)
}

fn run(args: &[&Path]) -> Output {
    run_with(&[], args)
}

fn run_with(flags: &[&str], args: &[&Path]) -> Output {
    Command::new(gzchunk_bin())
        .args(flags)
        .args(args)
        .env_remove("GZCHUNK_CHUNK_SIZE")
        .env_remove("GZCHUNK_MAX_SIZE")
        .output()
        .expect("failed to run gzchunk")
}

// ── 1. Decompress ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_hello_world() {
    let (dir, src) = temp_file("hello.gz", &gzip(b"hello world"));
    let dst = dir.path().join("hello.txt");

    let out = run(&[&src, &dst]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&dst).unwrap(), b"hello world");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("decompressed length: 11 bytes"), "stderr: {stderr}");
}

#[test]
fn test_cli_byte_by_byte_matches_default() {
    let payload = "line of text for the chunk size test\n".repeat(500);
    let (dir, src) = temp_file("text.gz", &gzip(payload.as_bytes()));
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    assert!(run(&[&src, &a]).status.success());
    assert!(run_with(&["-c", "1"], &[&src, &b]).status.success());
    assert_eq!(fs::read(&a).unwrap(), payload.as_bytes());
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn test_cli_chunk_size_from_env() {
    let (dir, src) = temp_file("env.gz", &gzip(b"environment configured"));
    let dst = dir.path().join("env.txt");
    let out = Command::new(gzchunk_bin())
        .args(["-vv"])
        .arg(&src)
        .arg(&dst)
        .env("GZCHUNK_CHUNK_SIZE", "3")
        .env_remove("GZCHUNK_MAX_SIZE")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(fs::read(&dst).unwrap(), b"environment configured");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("chunk size 3 bytes"), "stderr: {stderr}");
}

#[test]
fn test_cli_stdout_sentinel() {
    let (_dir, src) = temp_file("out.gz", &gzip(b"to standard output"));
    let out = Command::new(gzchunk_bin())
        .arg(&src)
        .arg("stdout")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, b"to standard output");
}

// ── 2. Overwrite policy ───────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_existing_destination() {
    let (dir, src) = temp_file("in.gz", &gzip(b"new contents"));
    let dst = dir.path().join("existing.txt");
    fs::write(&dst, b"keep me").unwrap();

    let out = run(&[&src, &dst]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&dst).unwrap(), b"keep me");

    let out = run_with(&["-f"], &[&src, &dst]);
    assert!(out.status.success());
    assert_eq!(fs::read(&dst).unwrap(), b"new contents");
}

// ── 3. Test mode ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_writes_nothing() {
    let (dir, src) = temp_file("check.gz", &gzip(b"verify only"));
    let out = run_with(&["-t"], &[&src]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_cli_test_mode_reports_corruption() {
    let mut gz = gzip(b"verify only");
    let crc_at = gz.len() - 8;
    gz[crc_at] ^= 0xFF;
    let (_dir, src) = temp_file("bad.gz", &gz);
    let out = run_with(&["-t"], &[&src]);
    assert_eq!(out.status.code(), Some(4));
}

// ── 4. Exit codes ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_corrupt_header_exit_code() {
    let mut gz = gzip(b"hello world");
    gz[0] = 0x00;
    let (dir, src) = temp_file("corrupt.gz", &gz);
    let dst = dir.path().join("never.txt");

    let out = run(&[&src, &dst]);
    assert_eq!(out.status.code(), Some(3));
    assert!(!dst.exists(), "failed session must not create the destination");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error parsing header: -3"), "stderr: {stderr}");
}

#[test]
fn test_cli_checksum_exit_code() {
    let mut gz = gzip(b"hello world");
    let crc_at = gz.len() - 8;
    gz[crc_at + 1] ^= 0x01;
    let (dir, src) = temp_file("crc.gz", &gz);
    let dst = dir.path().join("never.txt");

    let out = run(&[&src, &dst]);
    assert_eq!(out.status.code(), Some(4));
    assert!(!dst.exists());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error during decompression: -4"), "stderr: {stderr}");
}

#[test]
fn test_cli_file_too_small() {
    let (dir, src) = temp_file("tiny.gz", &[0x1f, 0x8b]);
    let dst = dir.path().join("never.txt");
    let out = run(&[&src, &dst]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dst.exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("file too small"));
}

#[test]
fn test_cli_max_size_flag() {
    let (dir, src) = temp_file("big.gz", &gzip(&[0u8; 4096]));
    let dst = dir.path().join("never.txt");
    let out = run_with(&["--max-size", "1000"], &[&src, &dst]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dst.exists());
}

#[test]
fn test_cli_zero_chunk_size_rejected() {
    let (dir, src) = temp_file("in.gz", &gzip(b"x"));
    let dst = dir.path().join("never.txt");
    let out = run_with(&["-c", "0"], &[&src, &dst]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dst.exists());
}

#[test]
fn test_cli_missing_source() {
    let dir = TempDir::new().unwrap();
    let out = run(&[&dir.path().join("absent.gz"), &dir.path().join("out")]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_quiet_suppresses_messages() {
    let (dir, src) = temp_file("q.gz", &gzip(b"quiet please"));
    let dst = dir.path().join("q.txt");
    let out = run_with(&["-qq"], &[&src, &dst]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

// ── 5. Header MTIME ───────────────────────────────────────────────────────────

#[test]
fn test_cli_restores_mtime() {
    let mut enc = GzBuilder::new()
        .mtime(1_000_000_000)
        .write(Vec::new(), Compression::default());
    enc.write_all(b"timestamped").unwrap();
    let (dir, src) = temp_file("stamp.gz", &enc.finish().unwrap());
    let dst = dir.path().join("stamp.txt");

    let out = run_with(&["-N"], &[&src, &dst]);
    assert!(out.status.success());
    let meta = fs::metadata(&dst).unwrap();
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    assert_eq!(mtime.unix_seconds(), 1_000_000_000);
}
