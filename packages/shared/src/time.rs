//! Time-related utilities with clock abstraction for testability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, FixedOffset, Utc};

/// Clock trait for dependency injection and testing.
///
/// The chat log assigns timestamps at persist time, so stores take a
/// `Clock` instead of reading system time directly.
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in JST (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        jst_timestamp_millis()
    }
}

/// Manually driven clock for tests.
///
/// The reported time only changes when `set` or `advance` is called,
/// which makes timestamp-dependent behavior deterministic.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Set the reported time to an absolute value
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move the reported time forward (or backward, with a negative delta)
    pub fn advance(&self, delta_millis: i64) {
        self.now.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn jst_timestamp_millis() -> i64 {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap(); // JST is UTC+9
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst_offset);
    now_jst.timestamp_millis()
}
