//! Chunked decompression driver: the session state machine.
//!
//! # Control flow
//!
//! 1. [`ChunkedDriver::new`] builds the [`DecompressionState`] over the
//!    whole compressed object, excluding the 4-byte length trailer.
//! 2. [`ChunkedDriver::parse_header`] moves `Init → HeaderParsed`.
//! 3. [`ChunkedDriver::run`] marks the start of output and then loops:
//!    open a window of `min(remaining, chunk_size)` bytes, call the engine,
//!    charge the window against `remaining`, stop on `Done` or an error.
//!
//! # Budget accounting
//!
//! `remaining` starts at the buffer capacity and is decremented by the
//! *requested* window, not by the bytes the engine wrote. An engine that
//! returns `Ok` with a partly filled window therefore spends budget it did
//! not use. The inflate engine only returns `Ok` once a window is full, so
//! for it the two quantities agree on every call but the last.

use crate::config::DriverConfig;
use crate::displaylevel;
use crate::driver::oracle::payload_limit;
use crate::driver::types::{DriverError, MalformedKind, SessionReport, SessionStage};
use crate::engine::header::ISIZE_SIZE;
use crate::engine::{DecompressionState, Engine, EngineError, EngineStatus};

/// One decompression session over a memory-resident object.
pub struct ChunkedDriver<'a, E: Engine> {
    engine: E,
    state: DecompressionState<'a>,
    stage: SessionStage,
    chunk_size: usize,
    remaining: usize,
    chunks: usize,
    last_status: Option<EngineStatus>,
    failure: Option<DriverError>,
}

impl<'a, E: Engine> ChunkedDriver<'a, E> {
    /// Sets up a session reading `input` (trailer excluded) into `output`.
    ///
    /// The loop budget is `output.len()`, i.e. the full planned capacity.
    pub fn new(
        engine: E,
        input: &'a [u8],
        output: &'a mut [u8],
        cfg: &DriverConfig,
    ) -> Result<Self, DriverError> {
        if input.len() < ISIZE_SIZE {
            return Err(DriverError::MalformedInput(MalformedKind::TooShort {
                len: input.len(),
            }));
        }
        let remaining = output.len();
        let state = DecompressionState::new(input, payload_limit(input), output);
        Ok(Self {
            engine,
            state,
            stage: SessionStage::Init,
            chunk_size: cfg.chunk_size(),
            remaining,
            chunks: 0,
            last_status: None,
            failure: None,
        })
    }

    #[inline]
    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    /// Output budget not yet charged to a window.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Engine calls made by the decompress loop so far.
    #[inline]
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    #[inline]
    pub fn state(&self) -> &DecompressionState<'a> {
        &self.state
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Moves to `Failed`, remembering `err` for later `run` calls.
    fn fail(&mut self, err: DriverError) -> DriverError {
        self.stage = SessionStage::Failed;
        self.failure = Some(err.clone());
        err
    }

    /// `Init → HeaderParsed`, or `Failed` with `HeaderError`.
    pub fn parse_header(&mut self) -> Result<(), DriverError> {
        debug_assert_eq!(self.stage, SessionStage::Init);
        match self.engine.parse_header(&mut self.state) {
            Ok(EngineStatus::Ok) => {
                self.stage = SessionStage::HeaderParsed;
                displaylevel!(4, "header: {} bytes\n", self.state.source());
                Ok(())
            }
            // A header parse never finishes the stream.
            Ok(EngineStatus::Done) => Err(self.fail(DriverError::HeaderError(EngineError::Data))),
            Err(e) => Err(self.fail(DriverError::HeaderError(e))),
        }
    }

    /// Runs one chunk: open the window, call the engine, charge the budget.
    fn step(&mut self) -> Result<EngineStatus, DriverError> {
        debug_assert_eq!(self.stage, SessionStage::Decompressing);

        let chunk = self.remaining.min(self.chunk_size);
        self.state.open_window(chunk);
        displaylevel!(
            4,
            "Start dest and dest_limit: {:X} {:X}\n",
            self.state.dest() - self.state.dest_start(),
            self.state.dest_limit() - self.state.dest_start()
        );

        let res = self.engine.decompress_chunk(&mut self.state);
        self.remaining -= chunk;
        self.chunks += 1;

        match res {
            Ok(status) => {
                self.last_status = Some(status);
                displaylevel!(
                    4,
                    "end dest and dest_limit: {:X} {:X}\n",
                    self.state.dest() - self.state.dest_start(),
                    self.state.dest_limit() - self.state.dest_start()
                );
                Ok(status)
            }
            Err(e) => Err(self.fail(DriverError::DecompressionError(e))),
        }
    }

    /// Drives the session to a terminal stage, parsing the header first if
    /// that has not happened yet.
    ///
    /// Returns `dest - dest_start` once the engine signals `Done`. On a
    /// session that already ended, returns the same outcome again.
    pub fn run(&mut self) -> Result<usize, DriverError> {
        if self.stage.is_terminal() {
            return match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(self.state.produced_len()),
            };
        }
        if self.stage == SessionStage::Init {
            self.parse_header()?;
        }
        if self.stage == SessionStage::HeaderParsed {
            self.state.begin_output();
            self.stage = SessionStage::Decompressing;
        }

        while self.remaining > 0 {
            if self.step()? == EngineStatus::Done {
                break;
            }
        }

        if self.last_status != Some(EngineStatus::Done) {
            let err = DriverError::IncompleteOutput {
                produced: self.state.produced_len(),
                capacity: self.state.capacity(),
            };
            return Err(self.fail(err));
        }
        self.stage = SessionStage::Done;
        Ok(self.state.produced_len())
    }

    /// Summary of a finished session.
    pub fn report(&self, declared_length: u32) -> SessionReport {
        SessionReport {
            declared_length,
            capacity: self.state.capacity(),
            produced: self.state.produced_len(),
            chunks: self.chunks,
            consumed: self.state.source(),
            header: self.engine.header().cloned(),
        }
    }
}
