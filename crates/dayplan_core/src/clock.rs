//! Time source for "today" and "now".
//!
//! Planner operations and time-relative analytics read time only through a
//! `Clock`, so a fixed clock makes them deterministic in tests.

use crate::model::date::DateKey;
use chrono::Utc;

pub trait Clock {
    /// Current local calendar day.
    fn today(&self) -> DateKey;
    /// Current instant in Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::local_today()
    }

    fn now_epoch_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one day and instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: DateKey,
    now_epoch_ms: i64,
}

impl FixedClock {
    /// Pins the clock to local noon of `today`.
    pub fn on(today: DateKey) -> Self {
        Self {
            today,
            now_epoch_ms: today.local_noon_epoch_ms(),
        }
    }

    pub fn with_now(today: DateKey, now_epoch_ms: i64) -> Self {
        Self {
            today,
            now_epoch_ms,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        self.today
    }

    fn now_epoch_ms(&self) -> i64 {
        self.now_epoch_ms
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> DateKey {
        (**self).today()
    }

    fn now_epoch_ms(&self) -> i64 {
        (**self).now_epoch_ms()
    }
}
