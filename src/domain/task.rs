use super::enums::TaskStatus;
use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked task
///
/// Field names follow the camelCase layout of the stored JSON so files written
/// by earlier versions (and JSON exports) load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TaskStatus,
    /// Seconds accumulated while not running; excludes the current run
    #[serde(default)]
    pub elapsed_time: f64,
    /// Set if and only if `status == InProgress`
    #[serde(default, with = "ts_milliseconds_option")]
    pub last_start_time: Option<DateTime<Utc>>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Task {
    /// Create a pending task. Returns `None` for an empty or whitespace-only title.
    pub fn new<S: AsRef<str>>(id: Uuid, title: &str, tags: &[S], now: DateTime<Utc>) -> Option<Self> {
        let title = normalize_title(title)?;
        Some(Self {
            id,
            title,
            tags: normalize_tags(tags),
            status: TaskStatus::Pending,
            elapsed_time: 0.0,
            last_start_time: None,
            created_at: now,
            is_completed: false,
        })
    }

    pub fn is_running(&self) -> bool {
        self.status == TaskStatus::InProgress
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Start (or resume) the timer
    ///
    /// No-op when already running or when the task is completed.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running() || self.is_completed {
            return false;
        }
        self.status = TaskStatus::InProgress;
        self.last_start_time = Some(now);
        true
    }

    /// Pause the timer, folding the current run into `elapsed_time`
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(started) = self.last_start_time else {
            // Running without a start time; leave it for repair rather than guess a delta
            return false;
        };
        self.elapsed_time += seconds_between(started, now);
        self.status = TaskStatus::Paused;
        self.last_start_time = None;
        true
    }

    /// Reset the timer to rest, discarding accumulated time
    pub fn stop(&mut self) -> bool {
        let already_reset = self.status == TaskStatus::Pending
            && self.elapsed_time == 0.0
            && self.last_start_time.is_none();
        if already_reset {
            return false;
        }
        self.status = TaskStatus::Pending;
        self.elapsed_time = 0.0;
        self.last_start_time = None;
        true
    }

    /// Flip completion. A running task is paused first so it cannot keep running.
    pub fn toggle_complete(&mut self, now: DateTime<Utc>) {
        let completing = !self.is_completed;
        if completing {
            self.settle_completed(now);
        }
        self.is_completed = completing;
    }

    /// A completed task can't keep running: fold the current run into
    /// `elapsed_time` and pause. No-op unless running.
    pub fn settle_completed(&mut self, now: DateTime<Utc>) {
        if !self.is_running() {
            return;
        }
        if let Some(started) = self.last_start_time {
            self.elapsed_time += seconds_between(started, now);
        }
        self.status = TaskStatus::Paused;
        self.last_start_time = None;
    }

    /// Elapsed seconds including the current run, evaluated at `now`
    pub fn live_elapsed(&self, now: DateTime<Utc>) -> f64 {
        match (self.status, self.last_start_time) {
            (TaskStatus::InProgress, Some(started)) => self.elapsed_time + seconds_between(started, now),
            _ => self.elapsed_time,
        }
    }

    /// Restore the record invariants on data that did not come from this
    /// state machine (loaded files, externally edited tasks).
    pub fn repair(&mut self) {
        if !self.elapsed_time.is_finite() || self.elapsed_time < 0.0 {
            self.elapsed_time = 0.0;
        }

        match (self.status, self.last_start_time) {
            (TaskStatus::InProgress, None) => self.status = TaskStatus::Paused,
            (TaskStatus::Pending | TaskStatus::Paused, Some(_)) => self.last_start_time = None,
            _ => {}
        }

        if self.is_completed && self.is_running() {
            self.status = TaskStatus::Paused;
            self.last_start_time = None;
        }

        self.title = self.title.trim().to_string();
        self.tags = normalize_tags(&self.tags);
    }
}

/// Trim a title, rejecting empty input
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim tags, dropping empties and duplicates while keeping first-seen order
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// Parse comma-separated tag input ("work, urgent")
pub fn parse_tags(input: &str) -> Vec<String> {
    let parts: Vec<&str> = input.split(',').collect();
    normalize_tags(&parts)
}

/// Seconds from `from` to `to`, never negative
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = to.signed_duration_since(from).num_milliseconds();
    (millis.max(0) as f64) / 1000.0
}
