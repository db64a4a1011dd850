//! Delay planning.
//!
//! Turns an input sequence into one [`ScheduledProcess`] per value, in input
//! order. Planning is pure: no clock is read and nothing sleeps, so policy
//! violations are reported before any delay has been spent.

use std::time::Duration;

use crate::error::SortError;

/// Default delay per unit of value (1 ms).
pub const DEFAULT_UNIT_DELAY: Duration = Duration::from_millis(1);

/// What to do with values that would produce a negative delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelayPolicy {
    /// Fail the whole invocation with [`SortError::NegativeValue`].
    #[default]
    Reject,
    /// Schedule a zero delay. The value is still collected and the corrective
    /// pass puts it in its ascending position.
    Clamp,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// Delay scheduled per unit of value
    pub unit_delay: Duration,
    /// Handling of negative values
    pub delay_policy: DelayPolicy,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { unit_delay: DEFAULT_UNIT_DELAY, delay_policy: DelayPolicy::default() }
    }
}

/// A single value waiting for its delay to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledProcess {
    /// Value collected when the delay expires
    pub value: i64,
    /// How long the process sleeps before completing
    pub delay: Duration,
}

/// Plan one process per input value, preserving input order.
///
/// # Errors
///
/// Returns [`SortError::NegativeValue`] for the first negative value when the
/// policy is [`DelayPolicy::Reject`].
pub fn plan(numbers: &[i64], config: &SortConfig) -> Result<Vec<ScheduledProcess>, SortError> {
    numbers
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let delay = match (value < 0, config.delay_policy) {
                (true, DelayPolicy::Reject) => {
                    return Err(SortError::NegativeValue { index, value });
                },
                (true, DelayPolicy::Clamp) => Duration::ZERO,
                (false, _) => delay_for(value.unsigned_abs(), config.unit_delay),
            };

            Ok(ScheduledProcess { value, delay })
        })
        .collect()
}

/// `units * unit_delay`, saturating at `u64::MAX` nanoseconds.
fn delay_for(units: u64, unit_delay: Duration) -> Duration {
    let nanos = unit_delay.as_nanos().saturating_mul(u128::from(units));
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
