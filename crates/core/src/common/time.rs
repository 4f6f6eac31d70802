use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// # Summary
/// Clock abstraction so cache expiry and window boundaries can be driven by
/// tests instead of the system clock.
pub trait TimeProvider: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// # Summary
/// Wall clock used in production.
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// Manually driven clock for tests.
///
/// # Invariants
/// - Readers and writers share one `RwLock`; a poisoned lock still yields
///   the last stored instant.
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// Creates a clock frozen at `initial_time`
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// Moves the clock to `new_time`
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *time = new_time;
    }

    /// Moves the clock forward by `delta`
    pub fn advance(&self, delta: chrono::Duration) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *time += delta;
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fake_clock_advance() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let clock = FakeClockProvider::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(chrono::Duration::minutes(10));
        assert_eq!(clock.now(), start + chrono::Duration::minutes(10));

        clock.set_time(start);
        assert_eq!(clock.now(), start);
    }
}
