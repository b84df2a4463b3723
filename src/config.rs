// config.rs — Compile-time defaults and the per-session driver configuration.
//
// The compile-time constants are the values used when nothing else is
// specified. `DriverConfig` carries the tunables for one decompression
// session; it can be seeded from the environment (`GZCHUNK_CHUNK_SIZE`,
// `GZCHUNK_MAX_SIZE`) and then overridden by command-line flags.

use core::fmt;

// Output chunk size for one engine call.
// 1 gives byte-by-byte decompression with the smallest per-call window;
// larger values trade window size for fewer engine calls.
// Can be overridden by the GZCHUNK_CHUNK_SIZE environment variable,
// or by the -c/--chunk-size command-line flag.
pub const CHUNK_SIZE_DEFAULT: usize = 4096;

// Extra output capacity reserved past the declared length.
// One byte lets the engine observe end-of-stream after filling the declared
// length exactly, instead of stopping at a full window.
pub const GUARD_BYTES_DEFAULT: usize = 1;

// Upper bound applied to the untrusted trailer length before allocating.
// Can be overridden by the GZCHUNK_MAX_SIZE environment variable,
// or by the --max-size command-line flag.
pub const MAX_OUTPUT_SIZE_DEFAULT: u64 = 1 << 30;

// Environment variable names.
pub const ENV_CHUNK_SIZE: &str = "GZCHUNK_CHUNK_SIZE";
pub const ENV_MAX_SIZE: &str = "GZCHUNK_MAX_SIZE";

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A chunk size of zero would never advance the output cursor.
    ZeroChunkSize,
    /// An environment variable held something other than an unsigned integer.
    InvalidEnv { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroChunkSize => f.write_str("chunk size must be at least 1 byte"),
            ConfigError::InvalidEnv { name, value } => {
                write!(f, "{name}: expected an unsigned integer, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for one decompression session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    chunk_size: usize,
    guard_bytes: usize,
    max_output_size: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE_DEFAULT,
            guard_bytes: GUARD_BYTES_DEFAULT,
            max_output_size: MAX_OUTPUT_SIZE_DEFAULT,
        }
    }
}

impl DriverConfig {
    /// Defaults, then any `GZCHUNK_*` environment overrides.
    ///
    /// Unset variables are ignored. A variable that is set but does not
    /// parse is an error rather than being silently dropped.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup, so tests
    /// need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_CHUNK_SIZE) {
            let n = parse_env_number(ENV_CHUNK_SIZE, &v)?;
            let n = usize::try_from(n).map_err(|_| ConfigError::InvalidEnv {
                name: ENV_CHUNK_SIZE,
                value: v.clone(),
            })?;
            cfg = cfg.with_chunk_size(n)?;
        }
        if let Some(v) = lookup(ENV_MAX_SIZE) {
            cfg = cfg.with_max_output_size(parse_env_number(ENV_MAX_SIZE, &v)?);
        }
        Ok(cfg)
    }

    /// Sets the per-call output window. Zero is rejected.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Sets the slack reserved past the declared length.
    pub fn with_guard_bytes(mut self, guard_bytes: usize) -> Self {
        self.guard_bytes = guard_bytes;
        self
    }

    /// Sets the largest declared length the planner will allocate for.
    pub fn with_max_output_size(mut self, max_output_size: u64) -> Self {
        self.max_output_size = max_output_size;
        self
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub fn guard_bytes(&self) -> usize {
        self.guard_bytes
    }

    #[inline]
    pub fn max_output_size(&self) -> u64 {
        self.max_output_size
    }
}

fn parse_env_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_owned(),
    })
}
