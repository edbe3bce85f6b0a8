//! Pure operations over a task snapshot.
//!
//! Each function takes the current snapshot and returns the next one. Returning
//! a value equal to the input means "nothing changed"; the history treats that
//! as a no-op and records no entry.

use super::task::{normalize_tags, normalize_title, Task};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Prepend a new task. Blank titles leave the snapshot unchanged.
pub fn add<S: AsRef<str>>(tasks: &[Task], id: Uuid, title: &str, tags: &[S], now: DateTime<Utc>) -> Vec<Task> {
    let Some(task) = Task::new(id, title, tags, now) else {
        return tasks.to_vec();
    };
    if tasks.iter().any(|t| t.id == task.id) {
        return tasks.to_vec();
    }

    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(task);
    next.extend_from_slice(tasks);
    next
}

/// Replace the task with the same id
///
/// `created_at` stays that of the stored task. A replacement marked completed
/// while running has its current run folded into elapsed time at `now`.
pub fn update(tasks: &[Task], updated: &Task, now: DateTime<Utc>) -> Vec<Task> {
    let Some(title) = normalize_title(&updated.title) else {
        return tasks.to_vec();
    };
    let Some(existing) = tasks.iter().find(|t| t.id == updated.id) else {
        return tasks.to_vec();
    };

    let mut replacement = updated.clone();
    replacement.title = title;
    replacement.created_at = existing.created_at;
    if replacement.is_completed {
        replacement.settle_completed(now);
    }
    replacement.repair();

    map_matching(tasks, updated.id, |_| replacement.clone())
}

pub fn delete(tasks: &[Task], id: Uuid) -> Vec<Task> {
    tasks.iter().filter(|t| t.id != id).cloned().collect()
}

/// Remove every task whose id is in `ids`, keeping survivor order
pub fn delete_many(tasks: &[Task], ids: &HashSet<Uuid>) -> Vec<Task> {
    tasks.iter().filter(|t| !ids.contains(&t.id)).cloned().collect()
}

pub fn toggle_complete(tasks: &[Task], id: Uuid, now: DateTime<Utc>) -> Vec<Task> {
    map_matching(tasks, id, |task| {
        let mut task = task.clone();
        task.toggle_complete(now);
        task
    })
}

pub fn start_timer(tasks: &[Task], id: Uuid, now: DateTime<Utc>) -> Vec<Task> {
    map_matching(tasks, id, |task| {
        let mut task = task.clone();
        task.start(now);
        task
    })
}

pub fn pause_timer(tasks: &[Task], id: Uuid, now: DateTime<Utc>) -> Vec<Task> {
    map_matching(tasks, id, |task| {
        let mut task = task.clone();
        task.pause(now);
        task
    })
}

pub fn stop_timer(tasks: &[Task], id: Uuid) -> Vec<Task> {
    map_matching(tasks, id, |task| {
        let mut task = task.clone();
        task.stop();
        task
    })
}

/// Rename `old` to `new` on every task carrying it
///
/// A task that already has `new` ends up with a single copy, at the position of
/// whichever came first. Blank `new` or `new == old` is a no-op.
pub fn rename_tag(tasks: &[Task], old: &str, new: &str) -> Vec<Task> {
    let new = new.trim();
    if new.is_empty() || new == old {
        return tasks.to_vec();
    }

    tasks
        .iter()
        .map(|task| {
            if !task.has_tag(old) {
                return task.clone();
            }
            let renamed: Vec<&str> = task
                .tags
                .iter()
                .map(|t| if t == old { new } else { t.as_str() })
                .collect();
            Task {
                tags: normalize_tags(&renamed),
                ..task.clone()
            }
        })
        .collect()
}

/// Remove `tag` from every task carrying it
pub fn delete_tag(tasks: &[Task], tag: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if !task.has_tag(tag) {
                return task.clone();
            }
            Task {
                tags: task.tags.iter().filter(|t| *t != tag).cloned().collect(),
                ..task.clone()
            }
        })
        .collect()
}

/// Repair a freshly loaded collection: per-task invariants plus unique ids
pub fn repair(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut repaired = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        task.repair();
        if task.title.is_empty() {
            tracing::warn!(id = %task.id, "dropping task with empty title");
            continue;
        }
        if !seen.insert(task.id) {
            let fresh = Uuid::new_v4();
            tracing::warn!(old = %task.id, new = %fresh, "duplicate task id, assigning a new one");
            task.id = fresh;
            seen.insert(fresh);
        }
        repaired.push(task);
    }

    repaired
}

fn map_matching<F>(tasks: &[Task], id: Uuid, f: F) -> Vec<Task>
where
    F: Fn(&Task) -> Task,
{
    tasks
        .iter()
        .map(|task| if task.id == id { f(task) } else { task.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample() -> Vec<Task> {
        let tasks = add(&[], Uuid::new_v4(), "First", &["work"], at(0));
        let tasks = add(&tasks, Uuid::new_v4(), "Second", &["work", "office"], at(1));
        add(&tasks, Uuid::new_v4(), "Third", &["home"], at(2))
    }

    #[test]
    fn test_add_prepends() {
        let tasks = sample();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }

    #[test]
    fn test_add_blank_title_returns_same_snapshot() {
        let tasks = sample();
        let next = add::<&str>(&tasks, Uuid::new_v4(), "  ", &[], at(3));
        assert_eq!(next, tasks);
    }

    #[test]
    fn test_add_with_existing_id_is_rejected() {
        let tasks = sample();
        let next = add::<&str>(&tasks, tasks[0].id, "Clash", &[], at(3));
        assert_eq!(next, tasks);
    }

    #[test]
    fn test_update_replaces_matching_task() {
        let tasks = sample();
        let mut edited = tasks[1].clone();
        edited.title = "  Second, edited ".to_string();
        edited.tags = vec!["x".into(), "x".into()];

        let next = update(&tasks, &edited, at(3));
        assert_eq!(next[1].title, "Second, edited");
        assert_eq!(next[1].tags, vec!["x"]);
        assert_eq!(next[0], tasks[0]);
        assert_eq!(next[2], tasks[2]);
    }

    #[test]
    fn test_update_unknown_id_or_blank_title_is_noop() {
        let tasks = sample();
        let mut stranger = tasks[0].clone();
        stranger.id = Uuid::new_v4();
        stranger.title = "Changed".into();
        assert_eq!(update(&tasks, &stranger, at(3)), tasks);

        let mut blank = tasks[0].clone();
        blank.title = "   ".into();
        assert_eq!(update(&tasks, &blank, at(3)), tasks);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let tasks = sample();
        let mut edited = tasks[0].clone();
        edited.title = "Renamed".into();
        edited.created_at = at(999);

        let next = update(&tasks, &edited, at(5));
        assert_eq!(next[0].title, "Renamed");
        assert_eq!(next[0].created_at, tasks[0].created_at);
    }

    #[test]
    fn test_update_completing_running_task_keeps_elapsed() {
        let tasks = sample();
        let id = tasks[0].id;
        let started = start_timer(&tasks, id, at(10));

        let mut edited = started[0].clone();
        edited.is_completed = true;
        let next = update(&started, &edited, at(70));

        assert!(next[0].is_completed);
        assert_eq!(next[0].status, TaskStatus::Paused);
        assert_eq!(next[0].elapsed_time, 60.0);
        assert!(next[0].last_start_time.is_none());
    }

    #[test]
    fn test_delete_and_delete_many() {
        let tasks = sample();
        let next = delete(&tasks, tasks[1].id);
        assert_eq!(next.len(), 2);
        assert!(next.iter().all(|t| t.id != tasks[1].id));

        assert_eq!(delete(&tasks, Uuid::new_v4()), tasks);

        let ids: HashSet<Uuid> = [tasks[0].id, tasks[2].id].into_iter().collect();
        let survivors = delete_many(&tasks, &ids);
        assert_eq!(survivors, vec![tasks[1].clone()]);
    }

    #[test]
    fn test_timer_ops_touch_only_target() {
        let tasks = sample();
        let target = tasks[2].id;

        let started = start_timer(&tasks, target, at(10));
        assert_eq!(started[2].status, TaskStatus::InProgress);
        assert_eq!(started[0], tasks[0]);
        assert_eq!(started[1], tasks[1]);

        let paused = pause_timer(&started, target, at(25));
        assert_eq!(paused[2].elapsed_time, 15.0);
        assert_eq!(paused[2].status, TaskStatus::Paused);

        let stopped = stop_timer(&paused, target);
        assert_eq!(stopped[2].status, TaskStatus::Pending);
        assert_eq!(stopped[2].elapsed_time, 0.0);
    }

    #[test]
    fn test_pause_of_idle_task_returns_equal_snapshot() {
        let tasks = sample();
        assert_eq!(pause_timer(&tasks, tasks[0].id, at(5)), tasks);
    }

    #[test]
    fn test_toggle_complete_op() {
        let tasks = sample();
        let id = tasks[0].id;
        let started = start_timer(&tasks, id, at(0));
        let done = toggle_complete(&started, id, at(30));
        assert!(done[0].is_completed);
        assert_eq!(done[0].status, TaskStatus::Paused);
        assert_eq!(done[0].elapsed_time, 30.0);
    }

    #[test]
    fn test_rename_tag_collapses_duplicates() {
        let tasks = sample();
        let next = rename_tag(&tasks, "work", "office");

        // "Second" had ["work", "office"]
        assert_eq!(next[1].tags, vec!["office"]);
        // "First" had ["work"]
        assert_eq!(next[2].tags, vec!["office"]);
        // "Third" untouched
        assert_eq!(next[0], tasks[0]);
    }

    #[test]
    fn test_rename_tag_trims_and_rejects_invalid_targets() {
        let tasks = sample();
        assert_eq!(rename_tag(&tasks, "work", "   "), tasks);
        assert_eq!(rename_tag(&tasks, "work", "work"), tasks);
        assert_eq!(rename_tag(&tasks, "work", " work "), tasks);

        let next = rename_tag(&tasks, "home", " house ");
        assert_eq!(next[0].tags, vec!["house"]);
    }

    #[test]
    fn test_delete_tag() {
        let tasks = sample();
        let next = delete_tag(&tasks, "work");
        assert!(next.iter().all(|t| !t.has_tag("work")));
        assert_eq!(next[1].tags, vec!["office"]);
        assert_eq!(next[0], tasks[0]);
    }

    #[test]
    fn test_repair_assigns_fresh_ids_to_duplicates() {
        let tasks = sample();
        let mut loaded = tasks.clone();
        loaded[1].id = loaded[0].id;
        loaded.push(Task {
            title: "  ".into(),
            ..tasks[0].clone()
        });

        let repaired = repair(loaded);
        assert_eq!(repaired.len(), 3);
        let ids: HashSet<Uuid> = repaired.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(repaired[0].id, tasks[0].id);
    }
}
