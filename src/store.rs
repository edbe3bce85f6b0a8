//! The task store: undoable history of task snapshots plus the clock and the
//! persistence bridge. Every mutation goes through here.

use crate::clock::Clock;
use crate::domain::{collection, Task};
use crate::error::StoreError;
use crate::history::History;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Load/save contract for the task collection
pub trait TaskRepository {
    /// Previously saved tasks, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

pub struct TaskStore {
    history: History<Vec<Task>>,
    clock: Box<dyn Clock>,
    repository: Box<dyn TaskRepository>,
}

impl TaskStore {
    /// Open the store, starting from whatever the repository holds.
    ///
    /// A repository that fails to load is treated as empty.
    pub fn open(repository: Box<dyn TaskRepository>, clock: Box<dyn Clock>) -> Self {
        let initial = match repository.load() {
            Ok(Some(tasks)) => collection::repair(tasks),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to load saved tasks, starting empty");
                Vec::new()
            }
        };
        info!(count = initial.len(), "task store opened");

        Self {
            history: History::new(initial),
            clock,
            repository,
        }
    }

    /// Current snapshot
    pub fn tasks(&self) -> &[Task] {
        self.history.present()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == id)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Elapsed seconds for a task including its current run
    pub fn live_elapsed(&self, id: Uuid) -> Option<f64> {
        let now = self.now();
        self.get(id).map(|task| task.live_elapsed(now))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            debug!("undo");
            self.persist();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            debug!("redo");
            self.persist();
        }
        changed
    }

    /// Add a task; returns its id, or `None` when the title was blank
    pub fn add_task<S: AsRef<str>>(&mut self, title: &str, tags: &[S]) -> Option<Uuid> {
        let id = Uuid::new_v4();
        let added = self.apply("add", |tasks, now| collection::add(tasks, id, title, tags, now));
        added.then_some(id)
    }

    pub fn update_task(&mut self, task: &Task) -> bool {
        self.apply("update", |tasks, now| collection::update(tasks, task, now))
    }

    pub fn delete_task(&mut self, id: Uuid) -> bool {
        self.apply("delete", |tasks, _| collection::delete(tasks, id))
    }

    /// Delete several tasks as a single history entry
    pub fn delete_tasks(&mut self, ids: &HashSet<Uuid>) -> bool {
        if ids.is_empty() {
            return false;
        }
        self.apply("delete_many", |tasks, _| collection::delete_many(tasks, ids))
    }

    pub fn toggle_complete(&mut self, id: Uuid) -> bool {
        self.apply("toggle_complete", |tasks, now| collection::toggle_complete(tasks, id, now))
    }

    pub fn start_timer(&mut self, id: Uuid) -> bool {
        self.apply("start_timer", |tasks, now| collection::start_timer(tasks, id, now))
    }

    pub fn pause_timer(&mut self, id: Uuid) -> bool {
        self.apply("pause_timer", |tasks, now| collection::pause_timer(tasks, id, now))
    }

    pub fn stop_timer(&mut self, id: Uuid) -> bool {
        self.apply("stop_timer", |tasks, _| collection::stop_timer(tasks, id))
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) -> bool {
        self.apply("rename_tag", |tasks, _| collection::rename_tag(tasks, old, new))
    }

    pub fn delete_tag(&mut self, tag: &str) -> bool {
        self.apply("delete_tag", |tasks, _| collection::delete_tag(tasks, tag))
    }

    /// Commit one operation against the present snapshot, reading the clock once
    fn apply<F>(&mut self, op: &'static str, update: F) -> bool
    where
        F: FnOnce(&[Task], DateTime<Utc>) -> Vec<Task>,
    {
        let now = self.clock.now();
        let changed = self.history.commit(|tasks| update(tasks, now));
        if changed {
            debug!(op, count = self.tasks().len(), "committed");
            self.persist();
        } else {
            debug!(op, "no change");
        }
        changed
    }

    /// Best-effort save of the present snapshot
    fn persist(&self) {
        if let Err(err) = self.repository.save(self.tasks()) {
            warn!(error = %err, "failed to save tasks");
        }
    }
}
