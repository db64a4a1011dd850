//! Fuzz target for the scheduler-sort engine
//!
//! Runs arbitrary inputs through the engine on the simulated clock, under
//! both negative-value policies.
//!
//! # Invariants
//!
//! - Reject policy: error iff the input contains a negative value
//! - Clamp policy: every standard sort invariant holds
//! - NEVER panic, even for values near i64::MIN / i64::MAX

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleepsort_core::{DelayPolicy, SleepSort, SortConfig};
use sleepsort_harness::{InvariantRegistry, SimEnv, SortSnapshot, block_on};

#[derive(Debug, Arbitrary)]
struct EngineInput {
    values: Vec<i16>,
    clamp: bool,
}

fuzz_target!(|input: EngineInput| {
    let values: Vec<i64> = input.values.iter().map(|&v| i64::from(v)).collect();
    let delay_policy = if input.clamp { DelayPolicy::Clamp } else { DelayPolicy::Reject };
    let config = SortConfig { delay_policy, ..SortConfig::default() };
    let sorter = SleepSort::new(SimEnv::default(), config);

    match block_on(sorter.sort_with_time(&values)) {
        Ok(result) => {
            assert!(input.clamp || values.iter().all(|&v| v >= 0));
            let snapshot = SortSnapshot::new(&values, &result, config.unit_delay);
            InvariantRegistry::standard().assert_all(&snapshot, "engine fuzz");
        }
        Err(_) => {
            assert!(!input.clamp && values.iter().any(|&v| v < 0));
        }
    }
});
