//! Buffer planner: sizes and allocates the output buffer.
//!
//! Capacity is the declared length plus the configured guard. The guard
//! gives the engine room to observe end-of-stream after it has filled the
//! declared length exactly; it is not a bound on arbitrary overshoot.

use crate::config::DriverConfig;
use crate::driver::types::{DriverError, MalformedKind};

/// Sizing decision for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPlan {
    pub declared: u32,
    pub capacity: usize,
}

/// Computes `declared + guard` after capping `declared` against the
/// configured maximum.
///
/// # Errors
/// - `MalformedInput(DeclaredTooLarge)` when `declared` exceeds the cap.
/// - `AllocationFailure` when the capacity does not fit in `usize`.
pub fn plan_output(declared: u32, cfg: &DriverConfig) -> Result<OutputPlan, DriverError> {
    if u64::from(declared) > cfg.max_output_size() {
        return Err(DriverError::MalformedInput(MalformedKind::DeclaredTooLarge {
            declared,
            max: cfg.max_output_size(),
        }));
    }
    let requested = u64::from(declared).saturating_add(cfg.guard_bytes() as u64);
    let capacity = usize::try_from(declared)
        .ok()
        .and_then(|d| d.checked_add(cfg.guard_bytes()))
        .ok_or(DriverError::AllocationFailure { requested })?;
    Ok(OutputPlan { declared, capacity })
}

/// Allocates a zeroed buffer of `plan.capacity` bytes.
///
/// Uses a fallible reservation so an oversized request surfaces as
/// `AllocationFailure` instead of aborting the process.
pub fn allocate(plan: &OutputPlan) -> Result<Vec<u8>, DriverError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(plan.capacity)
        .map_err(|_| DriverError::AllocationFailure { requested: plan.capacity as u64 })?;
    buf.resize(plan.capacity, 0);
    Ok(buf)
}
