use chrono::{DateTime, SubsecRound, Utc};

/// Source of wall-clock time for timer transitions and task creation
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock, truncated to milliseconds
///
/// Timestamps are persisted as epoch milliseconds, so truncating here keeps the
/// in-memory value identical to what gets written to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Hand-driven clock for tests. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn at_epoch_secs(secs: i64) -> Self {
            let start = Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
            Self {
                now: Rc::new(Cell::new(start)),
            }
        }

        pub fn advance_secs(&self, secs: i64) {
            self.now.set(self.now.get() + Duration::seconds(secs));
        }

        pub fn advance_millis(&self, millis: i64) {
            self.now.set(self.now.get() + Duration::milliseconds(millis));
        }

        pub fn rewind_secs(&self, secs: i64) {
            self.now.set(self.now.get() - Duration::seconds(secs));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}
