//! Linear undo/redo history over immutable snapshots.
//!
//! Every committed change pushes the previous present onto `past` and clears
//! `future`, so undoing and then making a new change discards the abandoned
//! branch. Depth is unbounded.

use std::collections::VecDeque;

/// A value with a linear undo/redo timeline
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Older snapshots, oldest first
    past: Vec<T>,
    present: T,
    /// Undone snapshots, nearest first
    future: VecDeque<T>,
}

impl<T: PartialEq> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
        }
    }

    /// Current snapshot
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Compute a new present from the current one.
    ///
    /// Returns `false` (and records nothing) when the update produced a value
    /// equal to the current present.
    pub fn commit<F>(&mut self, update: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = update(&self.present);
        if next == self.present {
            return false;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        true
    }

    /// Step back one snapshot. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward one snapshot. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of snapshots available to undo
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of snapshots available to redo
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(history: &mut History<Vec<u32>>, value: u32) -> bool {
        history.commit(|current| {
            let mut next = current.clone();
            next.push(value);
            next
        })
    }

    #[test]
    fn test_new_history_has_nothing_to_undo_or_redo() {
        let history = History::new(vec![1u32]);
        assert_eq!(history.present(), &vec![1]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_records_previous_present() {
        let mut history = History::new(Vec::new());
        assert!(push(&mut history, 1));
        assert!(push(&mut history, 2));

        assert_eq!(history.present(), &vec![1, 2]);
        assert_eq!(history.undo_depth(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_of_equal_value_is_noop() {
        let mut history = History::new(vec![1u32]);
        assert!(!history.commit(|current| current.clone()));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_equal_value_commit_keeps_redo_stack() {
        let mut history = History::new(Vec::new());
        push(&mut history, 1);
        history.undo();

        assert!(!history.commit(|current| current.clone()));
        assert!(history.can_redo());
    }

    #[test]
    fn test_undo_round_trip_restores_initial_snapshot() {
        let mut history = History::new(vec![0u32]);
        for value in 1..=5 {
            push(&mut history, value);
        }

        for remaining in (0..5).rev() {
            assert!(history.can_undo());
            assert!(history.undo());
            assert_eq!(history.undo_depth(), remaining);
        }

        assert_eq!(history.present(), &vec![0]);
        assert!(!history.can_undo());
        assert_eq!(history.redo_depth(), 5);
    }

    #[test]
    fn test_undo_and_redo_on_empty_history_are_noops() {
        let mut history = History::new(vec![7u32]);
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.present(), &vec![7]);
    }

    #[test]
    fn test_redo_is_inverse_of_undo() {
        let mut history = History::new(Vec::new());
        push(&mut history, 1);
        push(&mut history, 2);
        push(&mut history, 3);

        history.undo();
        history.undo();
        assert_eq!(history.present(), &vec![1]);

        assert!(history.redo());
        assert_eq!(history.present(), &vec![1, 2]);
        assert!(history.redo());
        assert_eq!(history.present(), &vec![1, 2, 3]);
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 3);
    }

    #[test]
    fn test_commit_after_undo_discards_future() {
        let mut history = History::new(Vec::new());
        push(&mut history, 1);
        push(&mut history, 2);
        history.undo();
        assert!(history.can_redo());

        push(&mut history, 9);
        assert!(!history.can_redo());
        assert_eq!(history.present(), &vec![1, 9]);

        history.undo();
        assert_eq!(history.present(), &vec![1]);
        history.redo();
        assert_eq!(history.present(), &vec![1, 9]);
    }
}
