//! Schedule progress calculations.
//!
//! # Responsibility
//! - Derive integer percent-complete values from schedule time ranges.
//! - Keep all progress math pure; no clock access, callers pass `now`.
//!
//! # Invariants
//! - Degenerate ranges (`start >= end`) always report 0%.
//! - Per-item progress is monotonically non-decreasing in `now`.
//! - Aggregate progress over an empty set is 0.

use crate::model::schedule::Schedule;

/// Percent elapsed of `[start_ms, end_ms]` at `now_ms`, clamped to 0..=100.
///
/// Returns 0 for degenerate or inverted ranges; bad data read back from
/// storage degrades instead of panicking.
pub fn interval_progress(start_ms: i64, end_ms: i64, now_ms: i64) -> u8 {
    if start_ms >= end_ms {
        return 0;
    }
    if now_ms <= start_ms {
        return 0;
    }
    if now_ms >= end_ms {
        return 100;
    }

    let total = (end_ms - start_ms) as f64;
    let elapsed = (now_ms - start_ms) as f64;
    (elapsed / total * 100.0).round() as u8
}

/// Percent elapsed of one schedule's time range at `now_ms`.
pub fn schedule_progress(schedule: &Schedule, now_ms: i64) -> u8 {
    interval_progress(schedule.start_at, schedule.end_at, now_ms)
}

/// Arithmetic mean of per-item progress, rounded; 0 for an empty set.
pub fn overall_progress(schedules: &[Schedule], now_ms: i64) -> u8 {
    if schedules.is_empty() {
        return 0;
    }

    let sum: u32 = schedules
        .iter()
        .map(|schedule| u32::from(schedule_progress(schedule, now_ms)))
        .sum();
    (f64::from(sum) / schedules.len() as f64).round() as u8
}

/// Share of completed items as a rounded percentage; 0 for an empty set.
///
/// This is the home-screen "done today" metric, independent of time-based
/// interpolation.
pub fn completion_ratio(schedules: &[Schedule]) -> u8 {
    if schedules.is_empty() {
        return 0;
    }

    let completed = schedules.iter().filter(|s| s.completed).count();
    (completed as f64 / schedules.len() as f64 * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::interval_progress;

    #[test]
    fn midpoint_is_fifty_percent() {
        assert_eq!(interval_progress(0, 200, 100), 50);
    }

    #[test]
    fn degenerate_range_is_zero() {
        assert_eq!(interval_progress(100, 100, 150), 0);
        assert_eq!(interval_progress(200, 100, 150), 0);
    }

    #[test]
    fn boundaries_clamp_to_zero_and_hundred() {
        assert_eq!(interval_progress(100, 200, 100), 0);
        assert_eq!(interval_progress(100, 200, 50), 0);
        assert_eq!(interval_progress(100, 200, 200), 100);
        assert_eq!(interval_progress(100, 200, 999), 100);
    }
}
