// Integration tests driving the session with engines other than gzip.
//
// The driver only sees the `Engine` trait, so these engines exercise the
// loop contract directly: window sizing, budget charging, error mapping,
// and the guarantee that nothing is written outside the open window.

use std::cell::Cell;
use std::rc::Rc;

use gzchunk::driver::MalformedKind;
use gzchunk::engine::{DecompressionState, EngineResult};
use gzchunk::{decompress_using, DriverConfig, DriverError, Engine, EngineError, EngineStatus};

fn cfg(chunk: usize) -> DriverConfig {
    DriverConfig::default().with_chunk_size(chunk).unwrap()
}

fn with_trailer(body: &[u8], declared: u32) -> Vec<u8> {
    let mut v = body.to_vec();
    v.extend_from_slice(&declared.to_le_bytes());
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// Run-length engine: body is (count, byte) pairs, no header.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RunLength {
    pending: Option<(u8, usize)>,
}

impl Engine for RunLength {
    fn init(_: Option<&[u8]>) -> Result<Self, EngineError> {
        Ok(Self::default())
    }

    fn parse_header(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        Ok(EngineStatus::Ok)
    }

    fn decompress_chunk(&mut self, state: &mut DecompressionState<'_>) -> EngineResult {
        let input = state.pending_input();
        let mut used = 0;
        let written = {
            let (win, pos) = state.window_mut();
            let mut at = pos;
            loop {
                if let Some((byte, left)) = self.pending.take() {
                    let n = left.min(win.len() - at);
                    win[at..at + n].fill(byte);
                    at += n;
                    if n < left {
                        self.pending = Some((byte, left - n));
                        break;
                    }
                }
                match input.get(used..used + 2) {
                    Some(pair) => {
                        self.pending = Some((pair[1], usize::from(pair[0])));
                        used += 2;
                    }
                    None => break,
                }
            }
            at - pos
        };
        state.consume(used)?;
        state.commit(written)?;

        match (self.pending.is_some(), state.pending_input().len()) {
            (false, 0) => Ok(EngineStatus::Done),
            (false, 1) => Err(EngineError::Data),
            _ => Ok(EngineStatus::Ok),
        }
    }
}

#[test]
fn run_length_engine_decodes_through_driver() {
    let object = with_trailer(&[3, b'a', 2, b'b'], 5);
    for (chunk, calls) in [(1usize, 5usize), (2, 3), (4096, 1)] {
        let d = decompress_using(RunLength::default(), &object, &cfg(chunk)).unwrap();
        assert_eq!(d.output(), b"aaabb");
        assert_eq!(d.report().chunks, calls, "chunk {chunk}");
        assert_eq!(d.report().consumed, 4);
        assert!(d.report().header.is_none());
    }
}

#[test]
fn run_length_odd_body_is_data_error() {
    let object = with_trailer(&[1, b'a', 7], 1);
    let err = decompress_using(RunLength::default(), &object, &cfg(64)).unwrap_err();
    assert_eq!(err, DriverError::DecompressionError(EngineError::Data));
    assert_eq!(err.exit_status(), 3);
}

#[test]
fn run_length_overrun_is_incomplete() {
    // 200 bytes of output against a trailer claiming 10.
    let object = with_trailer(&[200, b'x'], 10);
    let err = decompress_using(RunLength::default(), &object, &cfg(3)).unwrap_err();
    assert_eq!(err, DriverError::IncompleteOutput { produced: 11, capacity: 11 });
}

// ─────────────────────────────────────────────────────────────────────────────
// Engines that misbehave
// ─────────────────────────────────────────────────────────────────────────────

/// Fills every window it is given and never finishes.
struct Greedy;

impl Engine for Greedy {
    fn init(_: Option<&[u8]>) -> Result<Self, EngineError> {
        Ok(Greedy)
    }

    fn parse_header(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        Ok(EngineStatus::Ok)
    }

    fn decompress_chunk(&mut self, state: &mut DecompressionState<'_>) -> EngineResult {
        let n = {
            let (win, pos) = state.window_mut();
            win[pos..].fill(0xAB);
            win.len() - pos
        };
        state.commit(n)?;
        Ok(EngineStatus::Ok)
    }
}

#[test]
fn greedy_engine_stops_at_capacity() {
    let object = with_trailer(b"", 20);
    for chunk in [1, 7, 4096] {
        let err = decompress_using(Greedy, &object, &cfg(chunk)).unwrap_err();
        assert_eq!(err, DriverError::IncompleteOutput { produced: 21, capacity: 21 });
    }
}

/// Returns `Ok` without writing anything, counting its calls.
struct Idle {
    calls: Rc<Cell<usize>>,
}

impl Engine for Idle {
    fn init(_: Option<&[u8]>) -> Result<Self, EngineError> {
        Ok(Idle { calls: Rc::default() })
    }

    fn parse_header(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        Ok(EngineStatus::Ok)
    }

    fn decompress_chunk(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        self.calls.set(self.calls.get() + 1);
        Ok(EngineStatus::Ok)
    }
}

#[test]
fn idle_engine_spends_budget_by_window() {
    let calls = Rc::new(Cell::new(0));
    let engine = Idle { calls: Rc::clone(&calls) };
    // Capacity 10, windows of 4: 4 + 4 + 2.
    let err = decompress_using(engine, &with_trailer(b"", 9), &cfg(4)).unwrap_err();
    assert_eq!(err, DriverError::IncompleteOutput { produced: 0, capacity: 10 });
    assert_eq!(calls.get(), 3);
}

/// Fails with a fixed outcome at a chosen stage.
struct Failing {
    header: EngineResult,
    chunk: EngineResult,
}

impl Engine for Failing {
    fn init(_: Option<&[u8]>) -> Result<Self, EngineError> {
        Ok(Failing {
            header: Ok(EngineStatus::Ok),
            chunk: Err(EngineError::Data),
        })
    }

    fn parse_header(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        self.header
    }

    fn decompress_chunk(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        self.chunk
    }
}

#[test]
fn engine_codes_propagate() {
    let object = with_trailer(b"....", 4);
    let cases = [
        (Err(EngineError::Checksum), Ok(EngineStatus::Done), DriverError::HeaderError(EngineError::Checksum), 4),
        (Ok(EngineStatus::Done), Ok(EngineStatus::Done), DriverError::HeaderError(EngineError::Data), 3),
        (Ok(EngineStatus::Ok), Err(EngineError::Dictionary), DriverError::DecompressionError(EngineError::Dictionary), 5),
        (Ok(EngineStatus::Ok), Err(EngineError::Truncated), DriverError::DecompressionError(EngineError::Truncated), 3),
    ];
    for (header, chunk, want, status) in cases {
        let err = decompress_using(Failing { header, chunk }, &object, &cfg(16)).unwrap_err();
        assert_eq!(err, want);
        assert_eq!(err.exit_status(), status);
    }
}

#[test]
fn done_with_nothing_written_is_success() {
    let object = with_trailer(b"", 0);
    let engine = Failing {
        header: Ok(EngineStatus::Ok),
        chunk: Ok(EngineStatus::Done),
    };
    let d = decompress_using(engine, &object, &cfg(16)).unwrap();
    assert!(d.output().is_empty());
    assert_eq!(d.report().chunks, 1);
}

/// Panics if the driver ever calls into it.
struct Untouchable;

impl Engine for Untouchable {
    fn init(_: Option<&[u8]>) -> Result<Self, EngineError> {
        Ok(Untouchable)
    }

    fn parse_header(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        panic!("header parsed for rejected input");
    }

    fn decompress_chunk(&mut self, _: &mut DecompressionState<'_>) -> EngineResult {
        panic!("engine called for rejected input");
    }
}

#[test]
fn rejected_inputs_never_reach_engine() {
    assert_eq!(
        decompress_using(Untouchable, &[1, 2, 3], &cfg(16)).unwrap_err(),
        DriverError::MalformedInput(MalformedKind::TooShort { len: 3 })
    );
    let small_cap = cfg(16).with_max_output_size(8);
    assert!(matches!(
        decompress_using(Untouchable, &with_trailer(b"", 9), &small_cap),
        Err(DriverError::MalformedInput(MalformedKind::DeclaredTooLarge { declared: 9, max: 8 }))
    ));
}
