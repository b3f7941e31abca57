use std::time::Duration;

use super::SystemInstant;

/// A point in time, passed explicitly into every poll so that timers can be
/// driven deterministically from tests
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    inner: SystemInstant,
}

impl Instant {
    pub fn now() -> Self {
        Self {
            inner: SystemInstant::now(),
        }
    }

    /// Time elapsed between `self` and `now`. Zero if `now` is earlier.
    pub fn elapsed(&self, now: &Self) -> Duration {
        now.inner.saturating_duration_since(self.inner)
    }

    pub fn add_millis(&mut self, millis: u32) {
        self.inner += Duration::from_millis(u64::from(millis));
    }

    pub fn add_duration(&mut self, duration: Duration) {
        self.inner += duration;
    }
}
