//! Display refresh for running timers.
//!
//! The ticker only decides when the screen should be redrawn so live elapsed
//! times advance. It never touches the task store, so ticking can't create
//! history entries. It is armed while at least one displayed task is running
//! and cancelled as soon as none is.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// How long the event loop may block when nothing is running
pub const IDLE_WAIT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct DisplayTicker {
    interval: Duration,
    /// Tasks currently displayed as running
    watched: BTreeSet<Uuid>,
    next_due: Option<Instant>,
}

impl DisplayTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            watched: BTreeSet::new(),
            next_due: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis.max(1)))
    }

    /// Re-evaluate which displayed tasks are running. Arms the tick when the
    /// first one appears and cancels it when the last one goes away.
    pub fn sync<I>(&mut self, running: I, now: Instant)
    where
        I: IntoIterator<Item = Uuid>,
    {
        let running: BTreeSet<Uuid> = running.into_iter().collect();
        if running == self.watched {
            return;
        }

        self.watched = running;
        if self.watched.is_empty() {
            self.cancel();
        } else if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Drop the pending tick
    pub fn cancel(&mut self) {
        self.watched.clear();
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a display refresh is due, and schedules the next one
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                // Skip missed ticks instead of firing a burst
                let mut next = due + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may wait for input before the next refresh
    pub fn timeout(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => IDLE_WAIT,
        }
    }
}
