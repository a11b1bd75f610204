//! Time sources for the game.
//!
//! The orchestrator reads the clock once per tick or player action and
//! passes that single `now` to every component. Timestamps are
//! milliseconds since the clock's origin.

use std::sync::atomic::{AtomicU64, Ordering};

use ramen_types::Millis;
use tokio::time::Instant;

/// A monotonic millisecond time source.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Milliseconds elapsed since the clock's origin.
    fn now(&self) -> Millis;
}

/// Wall-clock time measured from construction.
///
/// Built on [`tokio::time::Instant`], so it follows tokio's paused test
/// clock when one is active.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub const fn new(start: Millis) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::Release);
    }

    /// Move forward by `delta`. Returns the new time.
    pub fn advance(&self, delta: Millis) -> Millis {
        let previous = self
            .now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| {
                Some(t.saturating_add(delta))
            })
            .unwrap_or_else(|t| t);
        previous.saturating_add(delta)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.load(Ordering::Acquire)
    }
}
