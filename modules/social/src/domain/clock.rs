//! Time source port. Domain code never calls `Utc::now()` directly so that
//! cooldown arithmetic can be driven deterministically from tests.

use chrono::{DateTime, Duration, Local, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Render a timestamp in the server's local time zone,
/// e.g. `3:07 PM on Friday, October 16, 2026`.
pub fn format_local(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%-I:%M %p on %A, %B %-d, %Y")
        .to_string()
}
