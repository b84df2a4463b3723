// Integration tests for rejection paths: short input, header damage,
// payload damage. In every case no output is handed out.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use gzchunk::driver::MalformedKind;
use gzchunk::{decompress, DriverConfig, DriverError, EngineError};

fn gzip_with(payload: &[u8], level: Compression) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), level);
    enc.write_all(payload).unwrap();
    enc.finish().unwrap()
}

fn sample_text() -> Vec<u8> {
    b"Both input and output are kept in memory, so do not use this on huge files. "
        .iter()
        .cycle()
        .take(20_000)
        .copied()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Short input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inputs_under_four_bytes_are_malformed() {
    for len in 0..4 {
        let input = vec![0x1f; len];
        assert_eq!(
            decompress(&input, &DriverConfig::default()).unwrap_err(),
            DriverError::MalformedInput(MalformedKind::TooShort { len })
        );
    }
}

#[test]
fn trailer_only_input_fails_at_header() {
    // A valid-looking trailer with no container in front of it.
    let err = decompress(&5u32.to_le_bytes(), &DriverConfig::default()).unwrap_err();
    assert_eq!(err, DriverError::HeaderError(EngineError::Truncated));
}

// ─────────────────────────────────────────────────────────────────────────────
// Header damage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn damaged_magic_and_method_rejected() {
    let gz = gzip_with(b"hello world", Compression::default());
    for idx in 0..3 {
        let mut bad = gz.clone();
        bad[idx] ^= 0x40;
        let err = decompress(&bad, &DriverConfig::default()).unwrap_err();
        assert_eq!(err, DriverError::HeaderError(EngineError::Data), "byte {idx}");
        assert_eq!(err.exit_status(), 3);
    }
}

#[test]
fn reserved_flag_bits_rejected() {
    let gz = gzip_with(b"hello world", Compression::default());
    for bit in [0x20u8, 0x40, 0x80] {
        let mut bad = gz.clone();
        bad[3] |= bit;
        assert_eq!(
            decompress(&bad, &DriverConfig::default()).unwrap_err(),
            DriverError::HeaderError(EngineError::Data)
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payload damage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn flipped_bit_in_deflate_payload_fails() {
    let text = sample_text();
    let gz = gzip_with(&text, Compression::default());
    // Header is 10 bytes, trailer 8: flip somewhere in between.
    let mid = 10 + (gz.len() - 18) / 2;
    let mut failures = 0;
    for bit in 0..8 {
        let mut bad = gz.clone();
        bad[mid] ^= 1 << bit;
        for chunk in [1usize, 4096] {
            let cfg = DriverConfig::default().with_chunk_size(chunk).unwrap();
            match decompress(&bad, &cfg) {
                Err(err) => {
                    assert!(err.is_stream_failure(), "bit {bit} chunk {chunk}: {err:?}");
                    failures += 1;
                }
                // A flip that decodes to the same bytes also matches the CRC.
                Ok(d) => assert_eq!(d.output(), &text[..]),
            }
        }
    }
    assert!(failures > 0);
}

#[test]
fn flipped_bit_in_stored_data_is_checksum_error() {
    let payload = b"hello world, stored verbatim";
    let gz = gzip_with(payload, Compression::none());
    let at = gz
        .windows(payload.len())
        .position(|w| w == payload)
        .expect("stored block keeps payload verbatim");
    let mut bad = gz.clone();
    bad[at + 4] ^= 0x01;
    let err = decompress(&bad, &DriverConfig::default()).unwrap_err();
    assert_eq!(err, DriverError::DecompressionError(EngineError::Checksum));
    assert_eq!(err.exit_status(), 4);
}

#[test]
fn damaged_crc_is_checksum_error() {
    let mut gz = gzip_with(b"hello world", Compression::default());
    let crc_at = gz.len() - 8;
    gz[crc_at + 2] ^= 0x10;
    assert_eq!(
        decompress(&gz, &DriverConfig::default()).unwrap_err(),
        DriverError::DecompressionError(EngineError::Checksum)
    );
}

#[test]
fn truncated_stream_is_data_error() {
    let gz = gzip_with(&sample_text(), Compression::default());
    // Cut the deflate stream in half but keep a plausible length trailer.
    let mut cut = gz[..gz.len() / 2].to_vec();
    cut.extend_from_slice(&gz[gz.len() - 4..]);
    let err = decompress(&cut, &DriverConfig::default()).unwrap_err();
    assert_eq!(err.engine_code(), Some(-3));
    assert!(err.is_stream_failure());
}
