//! Snapshot history with a single discardable redo branch.

/// Linear undo/redo container over snapshots of `T`.
///
/// The sequence is never empty and `0 <= cursor < len` always holds.
/// `push` after `undo` discards everything past the cursor; there is no
/// branch tree. `undo`/`redo` past either end clamp instead of failing.
///
/// Stored values are only ever handed out by shared reference, so a snapshot
/// cannot change after it was pushed.
#[derive(Clone, Debug)]
pub struct HistoryStore<T> {
    sequence: Vec<T>,
    cursor: usize,
}

impl<T> HistoryStore<T> {
    /// Start a history holding only `initial`
    pub fn new(initial: T) -> Self {
        Self {
            sequence: vec![initial],
            cursor: 0,
        }
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> &T {
        &self.sequence[self.cursor]
    }

    /// Record a new state, dropping any redo branch.
    pub fn push(&mut self, next: T) {
        self.sequence.truncate(self.cursor + 1);
        self.sequence.push(next);
        self.cursor += 1;
    }

    /// Step back one snapshot. No-op at the first entry.
    pub fn undo(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Step forward one snapshot. No-op at the last entry.
    pub fn redo(&mut self) {
        self.cursor = (self.cursor + 1).min(self.sequence.len() - 1);
    }

    /// Throw away the whole history and start again from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.sequence.clear();
        self.sequence.push(initial);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.sequence.len() - 1
    }

    /// Number of stored snapshots (always at least one)
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false; a history holds at least its initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Index of the current snapshot
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All stored snapshots, oldest first
    pub fn entries(&self) -> &[T] {
        &self.sequence
    }
}

impl<T: Default> Default for HistoryStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockColor, BlockSet};

    #[test]
    fn test_new_history() {
        let history = HistoryStore::new("A");
        assert_eq!(*history.current(), "A");
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo_returns_same_value() {
        let mut history = HistoryStore::new(BlockSet::empty());
        let one = BlockSet::empty()
            .add_block(Block::new(0, 0, 0, BlockColor::rgb(255, 0, 0)))
            .unwrap();
        history.push(one.clone());
        assert!(history.can_undo());

        history.undo();
        assert!(history.current().is_empty());
        history.redo();
        assert!(history.current().ptr_eq(&one));
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut history = HistoryStore::new("A");
        history.push("B");
        history.push("C");
        assert_eq!(history.cursor(), 2);

        history.undo();
        assert_eq!(*history.current(), "B");

        history.push("D");
        assert_eq!(history.entries(), &["A", "B", "D"]);
        assert_eq!(history.cursor(), 2);

        history.redo();
        assert_eq!(*history.current(), "D");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_start_is_idempotent() {
        let mut history = HistoryStore::new(1);
        history.undo();
        history.undo();
        assert_eq!(*history.current(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_at_end_is_idempotent() {
        let mut history = HistoryStore::new(1);
        history.push(2);
        history.redo();
        history.redo();
        assert_eq!(*history.current(), 2);
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut history = HistoryStore::new(1);
        history.push(2);
        history.push(3);
        history.undo();

        history.reset(10);
        assert_eq!(history.entries(), &[10]);
        assert_eq!(*history.current(), 10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_cursor_stays_in_bounds_over_mixed_ops() {
        let mut history = HistoryStore::new(0u32);
        for step in 0..200u32 {
            match step % 7 {
                0 | 3 => history.undo(),
                1 | 5 => history.push(step),
                2 => history.redo(),
                4 => history.undo(),
                _ => history.redo(),
            }
            assert!(history.cursor() < history.len());
            assert_eq!(history.entries()[0], 0);
            assert_eq!(history.can_undo(), history.cursor() > 0);
            assert_eq!(history.can_redo(), history.cursor() + 1 < history.len());
        }
    }
}
