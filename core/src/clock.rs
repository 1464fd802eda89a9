// core/src/clock.rs
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of "now" for record timestamps and analytics.
pub trait Clock: Send + Sync + std::fmt::Debug {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Manually driven clock for tests and reproducible reports.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
  pub fn new(at: DateTime<Utc>) -> Self {
    FixedClock(Mutex::new(at))
  }

  pub fn set(&self, at: DateTime<Utc>) {
    *self.0.lock() = at;
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.0.lock();
    *guard += by;
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    *self.0.lock()
  }
}
