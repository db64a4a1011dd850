//! Observable result of a single sort invocation.

use std::time::Duration;

use sleepsort_core::TimedSort;

/// Input and reported outcome of one sort.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSnapshot {
    /// Values handed to the engine.
    pub input: Vec<i64>,
    /// Values the engine returned.
    pub output: Vec<i64>,
    /// Reported elapsed time, in seconds.
    pub time_taken: f64,
    /// Reported total delay, in seconds.
    pub total_sleep_time: f64,
    /// Delay per unit the engine was configured with.
    pub unit_delay: Duration,
}

impl SortSnapshot {
    /// Snapshot of a timed sort over `input`.
    pub fn new(input: &[i64], result: &TimedSort, unit_delay: Duration) -> Self {
        Self {
            input: input.to_vec(),
            output: result.sorted_array.clone(),
            time_taken: result.time_taken,
            total_sleep_time: result.total_sleep_time,
            unit_delay,
        }
    }

    /// Snapshot of sorting nothing.
    pub fn empty(unit_delay: Duration) -> Self {
        Self {
            input: Vec::new(),
            output: Vec::new(),
            time_taken: 0.0,
            total_sleep_time: 0.0,
            unit_delay,
        }
    }

    /// Expected total delay in seconds. Negative values contribute nothing.
    pub fn expected_sleep_secs(&self) -> f64 {
        let units: u128 = self.input.iter().map(|&v| u128::from(v.max(0).unsigned_abs())).sum();
        units.saturating_mul(self.unit_delay.as_nanos()) as f64 / 1e9
    }
}
