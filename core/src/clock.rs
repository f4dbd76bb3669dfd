//! Capture clock — the only source of "now" in the trainer.
//!
//! RULE: Nothing outside this module calls `Utc::now()`.
//! Tests swap in a `FixedClock` so timestamps are reproducible.

use crate::types::Timestamp;
use chrono::{Duration, TimeZone, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that starts at a fixed instant and moves forward by `step`
/// every time it is read.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<Timestamp>,
    step:    Duration,
}

impl FixedClock {
    pub fn at(start: Timestamp) -> Self {
        Self {
            current: Cell::new(start),
            step:    Duration::zero(),
        }
    }

    /// 2024-01-15T09:30:00Z, one minute per read.
    pub fn default_test() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
            .single()
            .unwrap_or_default();
        Self::at(start).stepping(Duration::minutes(1))
    }

    pub fn stepping(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}
