//! Scheduler-sort engine.
//!
//! Executes a delay plan against an [`Environment`]: each process sleeps for
//! its delay, then its value is appended to the output. Processes run one
//! after another on the calling task, so the output is collected in input
//! order and total wall-clock cost is the sum of all delays. The corrective
//! sort at the end is what actually guarantees ascending order.
//!
//! All state lives in a [`SortAccumulator`] created per invocation, so a
//! single [`SleepSort`] can serve concurrent callers.

use std::time::Duration;

use serde::Serialize;

use crate::{
    env::Environment,
    error::SortError,
    schedule::{self, ScheduledProcess, SortConfig},
};

/// Result of [`SleepSort::sort_with_time`].
///
/// Serializes as `{"sortedArray": [...], "timeTaken": f64, "totalSleepTime": f64}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedSort {
    /// Input values in ascending order
    pub sorted_array: Vec<i64>,
    /// Elapsed time of the whole invocation, in seconds
    pub time_taken: f64,
    /// Sum of all scheduled delays, in seconds
    pub total_sleep_time: f64,
}

/// Per-invocation output and delay total.
#[derive(Debug, Default)]
struct SortAccumulator {
    output: Vec<i64>,
    total_sleep: Duration,
}

impl SortAccumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), total_sleep: Duration::ZERO }
    }

    /// Record a process whose delay has expired.
    fn complete(&mut self, process: ScheduledProcess) {
        self.output.push(process.value);
        self.total_sleep = self.total_sleep.saturating_add(process.delay);
    }

    /// Corrective pass. Stable, so equal values keep completion order.
    fn finish(mut self) -> Self {
        self.output.sort();
        self
    }
}

/// Sleep sort engine bound to an environment.
#[derive(Debug, Clone)]
pub struct SleepSort<E: Environment> {
    env: E,
    config: SortConfig,
}

impl<E: Environment> SleepSort<E> {
    /// Create an engine that sleeps through `env`.
    pub fn new(env: E, config: SortConfig) -> Self {
        Self { env, config }
    }

    /// Engine configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort `numbers` ascending.
    ///
    /// Empty input returns an empty vector without sleeping.
    pub async fn sort(&self, numbers: &[i64]) -> Result<Vec<i64>, SortError> {
        Ok(self.run(numbers).await?.output)
    }

    /// Sort `numbers` ascending and report timing.
    ///
    /// `time_taken` covers planning, every delay, and the corrective pass, so
    /// it is never less than `total_sleep_time`.
    pub async fn sort_with_time(&self, numbers: &[i64]) -> Result<TimedSort, SortError> {
        let start = self.env.now();
        let accumulator = self.run(numbers).await?;
        let elapsed = self.env.now() - start;

        tracing::debug!(
            count = accumulator.output.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            slept_ms = accumulator.total_sleep.as_millis() as u64,
            "sleep sort finished"
        );

        Ok(TimedSort {
            sorted_array: accumulator.output,
            time_taken: elapsed.as_secs_f64(),
            total_sleep_time: accumulator.total_sleep.as_secs_f64(),
        })
    }

    async fn run(&self, numbers: &[i64]) -> Result<SortAccumulator, SortError> {
        let processes = schedule::plan(numbers, &self.config)?;
        let mut accumulator = SortAccumulator::with_capacity(processes.len());

        for process in processes {
            self.env.sleep(process.delay).await;
            tracing::trace!(value = process.value, delay = ?process.delay, "process completed");
            accumulator.complete(process);
        }

        Ok(accumulator.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_collects_in_completion_order() {
        let mut acc = SortAccumulator::with_capacity(3);
        for (value, ms) in [(3, 3), (1, 1), (2, 2)] {
            acc.complete(ScheduledProcess { value, delay: Duration::from_millis(ms) });
        }

        assert_eq!(acc.output, vec![3, 1, 2]);
        assert_eq!(acc.total_sleep, Duration::from_millis(6));

        let acc = acc.finish();
        assert_eq!(acc.output, vec![1, 2, 3]);
    }

    #[test]
    fn accumulator_sleep_total_saturates() {
        let mut acc = SortAccumulator::default();
        acc.complete(ScheduledProcess { value: 1, delay: Duration::MAX });
        acc.complete(ScheduledProcess { value: 2, delay: Duration::from_secs(1) });

        assert_eq!(acc.total_sleep, Duration::MAX);
    }
}
