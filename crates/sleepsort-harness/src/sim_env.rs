//! Simulated environment with a virtual clock and seeded RNG.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::{
    future::Future,
    ops::Sub,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sleepsort_core::Environment;

/// Point on the virtual timeline, measured from simulation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Time since simulation start.
    pub fn since_start(self) -> Duration {
        self.0
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

struct SimState {
    clock_nanos: AtomicU64,
    sleeps: AtomicUsize,
    overshoot: Duration,
    rng: Mutex<ChaCha8Rng>,
}

/// Deterministic environment for tests.
///
/// Clones share the same clock, counters, and RNG stream.
#[derive(Clone)]
pub struct SimEnv {
    state: Arc<SimState>,
}

impl SimEnv {
    /// Create an environment whose RNG is seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, Duration::ZERO)
    }

    /// Create an environment where every sleep overruns by `overshoot`.
    ///
    /// Models timer slack: elapsed time grows faster than requested delays.
    pub fn with_overshoot(seed: u64, overshoot: Duration) -> Self {
        Self::build(seed, overshoot)
    }

    fn build(seed: u64, overshoot: Duration) -> Self {
        Self {
            state: Arc::new(SimState {
                clock_nanos: AtomicU64::new(0),
                sleeps: AtomicUsize::new(0),
                overshoot,
                rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            }),
        }
    }

    /// Advance the virtual clock without sleeping.
    pub fn advance(&self, duration: Duration) {
        let step = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        // Closure always returns Some, so the update cannot fail.
        let _ = self.state.clock_nanos.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
            Some(now.saturating_add(step))
        });
    }

    /// Total virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.state.clock_nanos.load(Ordering::SeqCst))
    }

    /// Number of `sleep` calls made so far.
    pub fn sleep_count(&self) -> usize {
        self.state.sleeps.load(Ordering::SeqCst)
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> SimInstant {
        SimInstant(self.elapsed())
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.state.sleeps.fetch_add(1, Ordering::SeqCst);
        self.advance(duration.saturating_add(self.state.overshoot));
        std::future::ready(())
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        let mut rng = self.state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}
