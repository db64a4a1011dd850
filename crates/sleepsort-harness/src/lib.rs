//! Deterministic simulation harness for sleep sort testing.
//!
//! [`SimEnv`] implements [`sleepsort_core::Environment`] on a virtual clock:
//! every sleep completes immediately and advances time by exactly the
//! requested duration, so timing assertions are exact and tests never wait.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks WHAT must be true of every completed sort
//! (ascending, permutation of the input, delay accounting) against a
//! [`SortSnapshot`]. Use [`InvariantRegistry::standard()`] for the full set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_env;

use std::future::Future;

pub use invariants::{
    AscendingOrder, Invariant, InvariantRegistry, InvariantResult, LengthPreserved,
    MultisetPreserved, SleepAccounting, SortSnapshot, Violation, WallClockCoversSleep,
};
pub use sim_env::{SimEnv, SimInstant};

/// Drive a future to completion on a fresh current-thread runtime.
///
/// For synchronous test bodies (e.g. inside `proptest!`) that need to await
/// the engine.
pub fn block_on<F: Future>(future: F) -> F::Output {
    #[allow(clippy::expect_used)]
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("invariant: current-thread runtime always builds");

    runtime.block_on(future)
}
