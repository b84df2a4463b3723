// Integration tests for src/driver — whole sessions through the public API.
//
//   - `decompress` on valid gzip objects of several shapes
//   - chunk-size independence of the produced bytes
//   - session report fields (declared, produced, chunks, consumed, header)

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use gzchunk::driver::SessionStage;
use gzchunk::{decompress, DriverConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn gzip(payload: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(payload).unwrap();
    enc.finish().unwrap()
}

fn repetitive_bytes(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn noisy_bytes(len: usize) -> Vec<u8> {
    let mut x: u32 = 0x9E37_79B9;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        })
        .collect()
}

fn chunked(n: usize) -> DriverConfig {
    DriverConfig::default().with_chunk_size(n).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hello_world_scenario() {
    let gz = gzip(b"hello world");
    assert_eq!(&gz[gz.len() - 4..], &11u32.to_le_bytes());

    let d = decompress(&gz, &DriverConfig::default()).unwrap();
    assert_eq!(d.report().produced, 11);
    assert_eq!(d.report().declared_length, 11);
    assert_eq!(d.output(), b"hello world");
    assert_eq!(d.into_output(), b"hello world".to_vec());
}

#[test]
fn empty_payload() {
    let gz = gzip(b"");
    let d = decompress(&gz, &DriverConfig::default()).unwrap();
    assert_eq!(d.report().produced, 0);
    assert_eq!(d.report().capacity, 1);
    assert!(d.output().is_empty());
}

#[test]
fn repetitive_payload_roundtrip() {
    let payload = repetitive_bytes(200_000);
    let d = decompress(&gzip(&payload), &DriverConfig::default()).unwrap();
    assert_eq!(d.output(), &payload[..]);
    assert!(d.report().length_matches());
}

#[test]
fn incompressible_payload_roundtrip() {
    let payload = noisy_bytes(70_000);
    let d = decompress(&gzip(&payload), &DriverConfig::default()).unwrap();
    assert_eq!(d.output(), &payload[..]);
}

#[test]
fn stored_blocks_roundtrip() {
    let payload = noisy_bytes(100_000);
    let mut enc = GzEncoder::new(Vec::new(), Compression::none());
    enc.write_all(&payload).unwrap();
    let gz = enc.finish().unwrap();
    let d = decompress(&gz, &chunked(333)).unwrap();
    assert_eq!(d.output(), &payload[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk-size independence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn byte_by_byte_matches_default_chunk() {
    let payload = repetitive_bytes(9_000);
    let gz = gzip(&payload);
    let one = decompress(&gz, &chunked(1)).unwrap();
    let page = decompress(&gz, &chunked(4096)).unwrap();
    assert_eq!(one.output(), page.output());
    assert_eq!(one.output(), &payload[..]);
}

#[test]
fn odd_chunk_sizes_agree() {
    let payload = noisy_bytes(5_000);
    let gz = gzip(&payload);
    for n in [2usize, 3, 7, 255, 4095, 4097, 1 << 16] {
        let d = decompress(&gz, &chunked(n)).unwrap();
        assert_eq!(d.output(), &payload[..], "chunk size {n}");
    }
}

#[test]
fn payload_exactly_one_chunk() {
    // Declared length equals the chunk size; the guard byte gives the
    // engine room to see the end of the stream.
    let payload = repetitive_bytes(4096);
    let d = decompress(&gzip(&payload), &chunked(4096)).unwrap();
    assert_eq!(d.output(), &payload[..]);
    assert_eq!(d.report().capacity, 4097);
}

// ─────────────────────────────────────────────────────────────────────────────
// Report contents
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn chunk_count_tracks_chunk_size() {
    let payload = repetitive_bytes(10_000);
    let gz = gzip(&payload);
    let d = decompress(&gz, &chunked(1000)).unwrap();
    // 10 full windows, then one more call that sees the end.
    assert!(d.report().chunks >= 10 && d.report().chunks <= 11);

    let d = decompress(&gz, &chunked(1 << 20)).unwrap();
    assert_eq!(d.report().chunks, 1);
}

#[test]
fn consumed_covers_everything_but_length_trailer() {
    let gz = gzip(b"some text to compress, some text to compress");
    let d = decompress(&gz, &DriverConfig::default()).unwrap();
    assert_eq!(d.report().consumed, gz.len() - 4);
}

#[test]
fn header_fields_surface_in_report() {
    let mut enc = GzBuilder::new()
        .filename("notes.txt")
        .mtime(1_600_000_000)
        .write(Vec::new(), Compression::default());
    enc.write_all(b"notes").unwrap();
    let gz = enc.finish().unwrap();

    let d = decompress(&gz, &DriverConfig::default()).unwrap();
    let hdr = d.report().header.as_ref().unwrap();
    assert_eq!(hdr.name_lossy().as_deref(), Some("notes.txt"));
    assert_eq!(hdr.mtime, 1_600_000_000);
    assert_eq!(d.output(), b"notes");
}

#[test]
fn driver_stage_reaches_done() {
    use gzchunk::driver::{oracle, planner, ChunkedDriver};
    use gzchunk::{Engine, InflateEngine};

    let gz = gzip(b"stage check");
    let cfg = DriverConfig::default();
    let declared = oracle::declared_length(&gz).unwrap();
    let plan = planner::plan_output(declared, &cfg).unwrap();
    let mut buf = planner::allocate(&plan).unwrap();
    let engine = InflateEngine::init(None).unwrap();
    let mut drv = ChunkedDriver::new(engine, &gz, &mut buf, &cfg).unwrap();

    drv.parse_header().unwrap();
    assert_eq!(drv.stage(), SessionStage::HeaderParsed);
    assert_eq!(drv.run().unwrap(), 11);
    assert_eq!(drv.stage(), SessionStage::Done);
    assert!(drv.engine().is_finished());
}
