//! Error surface tests: every failure class reachable through the public
//! API, its numeric code, exit status, and user-facing message.

use std::error::Error as _;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use gzchunk::config::ConfigError;
use gzchunk::driver::report::exit_status;
use gzchunk::driver::MalformedKind;
use gzchunk::engine::types::{CODE_CHECKSUM_ERROR, CODE_DATA_ERROR, CODE_DICT_ERROR, CODE_DONE, CODE_OK};
use gzchunk::{decompress, DriverConfig, DriverError, Engine, EngineError, EngineStatus, InflateEngine};

fn gzip(payload: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(payload).unwrap();
    enc.finish().unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_result_codes() {
    assert_eq!(CODE_OK, 0);
    assert_eq!(CODE_DONE, 1);
    assert_eq!(EngineStatus::Ok.code(), CODE_OK);
    assert_eq!(EngineStatus::Done.code(), CODE_DONE);
    assert_eq!(EngineError::Data.code(), CODE_DATA_ERROR);
    assert_eq!(EngineError::Truncated.code(), CODE_DATA_ERROR);
    assert_eq!(EngineError::Checksum.code(), CODE_CHECKSUM_ERROR);
    assert_eq!(EngineError::Dictionary.code(), CODE_DICT_ERROR);
    for e in [
        EngineError::Data,
        EngineError::Truncated,
        EngineError::Checksum,
        EngineError::Dictionary,
    ] {
        assert!(e.code() < 0, "{e}");
    }
}

#[test]
fn test_exit_status_per_class() {
    let cases = [
        (DriverError::MalformedInput(MalformedKind::TooShort { len: 2 }), 1),
        (
            DriverError::MalformedInput(MalformedKind::DeclaredTooLarge { declared: 9, max: 8 }),
            1,
        ),
        (DriverError::AllocationFailure { requested: 1 << 40 }, 1),
        (DriverError::HeaderError(EngineError::Data), 3),
        (DriverError::HeaderError(EngineError::Checksum), 4),
        (DriverError::DecompressionError(EngineError::Truncated), 3),
        (DriverError::DecompressionError(EngineError::Dictionary), 5),
        (DriverError::IncompleteOutput { produced: 4, capacity: 4 }, 1),
    ];
    for (err, status) in cases {
        assert_eq!(err.exit_status(), status, "{err:?}");
        assert_eq!(exit_status(&Err(err)), status);
    }
}

#[test]
fn test_success_exit_status_is_zero() {
    let result = decompress(&gzip(b"fine"), &DriverConfig::default());
    assert_eq!(exit_status(&result), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_header_error_message() {
    let mut gz = gzip(b"hello world");
    gz[1] = 0;
    let err = decompress(&gz, &DriverConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Error parsing header: -3 (data error)");
    assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("data error"));
}

#[test]
fn test_decompression_error_message() {
    let mut gz = gzip(b"hello world");
    let crc_at = gz.len() - 8;
    gz[crc_at] ^= 1;
    let err = decompress(&gz, &DriverConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Error during decompression: -4 (checksum mismatch)");
}

#[test]
fn test_too_small_message() {
    let err = decompress(&[1, 2], &DriverConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "file too small (2 bytes, need at least 4)");
    assert!(err.source().is_none());
}

#[test]
fn test_incomplete_output_message() {
    let mut gz = gzip(b"twenty bytes of text");
    let n = gz.len();
    gz[n - 4..].copy_from_slice(&3u32.to_le_bytes());
    let err = decompress(&gz, &DriverConfig::default()).unwrap_err();
    assert!(!err.to_string().is_empty());
    assert!(err.to_string().starts_with("Error during decompression"));
    assert_eq!(err.engine_code(), None);
}

#[test]
fn test_config_error_messages() {
    assert_eq!(
        ConfigError::ZeroChunkSize.to_string(),
        "chunk size must be at least 1 byte"
    );
    let e = ConfigError::InvalidEnv {
        name: "GZCHUNK_MAX_SIZE",
        value: "ten".into(),
    };
    assert!(e.to_string().starts_with("GZCHUNK_MAX_SIZE"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine setup
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_dictionary_mode_unsupported() {
    match InflateEngine::init(Some(&b"preset dictionary"[..])) {
        Err(e) => {
            assert_eq!(e, EngineError::Dictionary);
            assert_eq!(e.code(), -5);
        }
        Ok(_) => panic!("dictionary mode should be rejected"),
    }
}
