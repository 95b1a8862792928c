//! Controllable clock for deterministic timestamps

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// A clock that stays at a fixed instant until moved explicitly
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Fixes the clock at the given UTC wall time
    ///
    /// # Panics
    ///
    /// Panics if the components do not form a valid timestamp.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .unwrap_or_else(|| panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:{minute}:{second}"));
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for FixedClock {
    /// 2025-01-01T10:00:00Z, the instant most fixtures are built around
    fn default() -> Self {
        Self::at(2025, 1, 1, 10, 0, 0)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let clock = FixedClock::default();
        let start = clock.utc();
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.utc() - start, Duration::minutes(5));
    }
}
