//! Monotonic time sources.
//!
//! The stepper only ever sees a [`Duration`] since some fixed origin. Where
//! that reading comes from is the host's business.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// A monotonic clock reporting time elapsed since its own origin.
pub trait Clock: Send + Sync {
    /// Current reading. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Wall-clock-free monotonic clock backed by [`tokio::time::Instant`].
///
/// Inside a runtime with paused time (`#[tokio::test(start_paused = true)]`)
/// this follows the mocked clock, which keeps driver tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and pass
/// another to the driver.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(saturating_micros(by), Ordering::SeqCst);
    }

    /// Sets an absolute reading. Ignored if it would move the clock backwards.
    pub fn set(&self, at: Duration) {
        self.micros.fetch_max(saturating_micros(at), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

fn saturating_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
