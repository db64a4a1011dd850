//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use std::collections::BTreeMap;

use super::{Invariant, InvariantResult, SortSnapshot, Violation};

/// Absolute tolerance for comparing reported seconds.
const SECONDS_EPSILON: f64 = 1e-6;

/// Output length equals input length.
///
/// No value is dropped and no value is collected twice.
pub struct LengthPreserved;

impl Invariant for LengthPreserved {
    fn name(&self) -> &'static str {
        "LengthPreserved"
    }

    fn check(&self, snapshot: &SortSnapshot) -> InvariantResult {
        if snapshot.input.len() != snapshot.output.len() {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "input has {} values, output has {}",
                    snapshot.input.len(),
                    snapshot.output.len()
                ),
            });
        }
        Ok(())
    }
}

/// Output never decreases.
pub struct AscendingOrder;

impl Invariant for AscendingOrder {
    fn name(&self) -> &'static str {
        "AscendingOrder"
    }

    fn check(&self, snapshot: &SortSnapshot) -> InvariantResult {
        for (i, window) in snapshot.output.windows(2).enumerate() {
            if window[1] < window[0] {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "output[{}] = {} is greater than output[{}] = {}",
                        i,
                        window[0],
                        i + 1,
                        window[1]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Output holds exactly the input values, with multiplicity.
pub struct MultisetPreserved;

impl Invariant for MultisetPreserved {
    fn name(&self) -> &'static str {
        "MultisetPreserved"
    }

    fn check(&self, snapshot: &SortSnapshot) -> InvariantResult {
        let input = counts(&snapshot.input);
        let output = counts(&snapshot.output);

        if input != output {
            return Err(Violation {
                invariant: self.name(),
                message: format!("input counts {input:?} differ from output counts {output:?}"),
            });
        }
        Ok(())
    }
}

fn counts(values: &[i64]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Reported sleep equals the sum of planned delays.
///
/// With a 1 ms unit this is `sum(input) / 1000` seconds.
pub struct SleepAccounting;

impl Invariant for SleepAccounting {
    fn name(&self) -> &'static str {
        "SleepAccounting"
    }

    fn check(&self, snapshot: &SortSnapshot) -> InvariantResult {
        let expected = snapshot.expected_sleep_secs();
        if (snapshot.total_sleep_time - expected).abs() > SECONDS_EPSILON {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "reported {}s of sleep, planned {}s",
                    snapshot.total_sleep_time, expected
                ),
            });
        }
        Ok(())
    }
}

/// Elapsed time is at least the total sleep.
///
/// Delays run one after another, so wall clock covers their sum.
pub struct WallClockCoversSleep;

impl Invariant for WallClockCoversSleep {
    fn name(&self) -> &'static str {
        "WallClockCoversSleep"
    }

    fn check(&self, snapshot: &SortSnapshot) -> InvariantResult {
        if snapshot.time_taken + SECONDS_EPSILON < snapshot.total_sleep_time {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "elapsed {}s is less than total sleep {}s",
                    snapshot.time_taken, snapshot.total_sleep_time
                ),
            });
        }
        Ok(())
    }
}
