//! Sleep sort core.
//!
//! Every input value schedules a delay proportional to its magnitude and is
//! collected when that delay expires. A conventional sort runs afterwards as a
//! corrective pass, so the result is ascending regardless of timer jitter.
//!
//! This is a novelty technique, not a practical sorting algorithm: delays run
//! one after another on the calling task, so wall-clock cost is the SUM of all
//! delays rather than the maximum. Nothing here is a concurrent scheduler.
//!
//! # Architecture
//!
//! The crate follows the Sans-IO pattern. [`schedule`] turns an input sequence
//! into a plan of timed processes without touching a clock, and
//! [`SleepSort`] executes that plan against an [`Environment`], which supplies
//! time and the sleep primitive. Production code uses a Tokio-backed
//! environment; tests use a virtual clock for determinism.
//!
//! # Components
//!
//! - [`Environment`]: time, sleep, and randomness abstraction
//! - [`schedule::plan`]: pure delay planning with a [`DelayPolicy`]
//! - [`SleepSort`]: the scheduler-sort engine
//! - [`SortError`]: engine failures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod env;
pub mod error;
pub mod schedule;

pub use engine::{SleepSort, TimedSort};
pub use env::Environment;
pub use error::SortError;
pub use schedule::{DelayPolicy, ScheduledProcess, SortConfig};
