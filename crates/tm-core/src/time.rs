//! Timestamp helpers.
//!
//! Fixes carry `DateTime<Utc>`; thresholds are configured in (fractional)
//! minutes and converted once at stage entry.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{CoreError, CoreResult};

/// Canonical timestamp type of the workspace.
pub type Timestamp = DateTime<Utc>;

/// Convert fractional minutes into a `TimeDelta` with nanosecond resolution.
#[inline]
pub fn minutes(m: f64) -> TimeDelta {
    TimeDelta::nanoseconds((m * 60.0e9).round() as i64)
}

/// Seconds elapsed from `from` to `to` (negative if `to` is earlier).
#[inline]
pub fn elapsed_secs(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_milliseconds() as f64 / 1_000.0
}

/// Reject non-finite or negative thresholds.
pub fn check_threshold(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "{name} must be a finite, non-negative number, got {value}"
        )))
    }
}
