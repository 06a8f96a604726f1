//! Freshness policy and time sources.

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Default freshness window for cached playlists.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Single global TTL: an entry is fresh while `now - written_at < ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    ttl: Duration,
}

impl StalenessPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Entries written in the future (clock skew) count as fresh.
    pub fn is_fresh(&self, written_at: SystemTime, now: SystemTime) -> bool {
        match now.duration_since(written_at) {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        }
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// Source of "now" for the cache.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: SystemTime) {
        if let Ok(mut t) = self.now.lock() {
            *t = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut t) = self.now.lock() {
            *t += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        match self.now.lock() {
            Ok(t) => *t,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
