//! Bounded snapshot history.
//!
//! The log is a list of whole-grid snapshots plus a cursor. Entries after the cursor are the
//! redo-able future; pushing a new snapshot discards them. Snapshots are owned deep copies,
//! so later edits to the live grid cannot change a stored entry.

use crate::grid::Grid;

/// Default number of snapshots kept per document.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Undo/redo log of grid snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<Grid>,
    current_index: usize,
    max_size: usize,
}

impl HistoryManager {
    /// Create a log holding only `initial`, bounded to `max_size` entries (at least 1).
    pub fn new(initial: &Grid, max_size: usize) -> Self {
        Self {
            entries: vec![initial.clone()],
            current_index: 0,
            max_size: max_size.max(1),
        }
    }

    /// Create a log bounded to [`DEFAULT_MAX_HISTORY`] entries.
    pub fn with_default_size(initial: &Grid) -> Self {
        Self::new(initial, DEFAULT_MAX_HISTORY)
    }

    /// Discard every entry and start over from `grid`.
    pub fn reset(&mut self, grid: &Grid) {
        self.entries.clear();
        self.entries.push(grid.clone());
        self.current_index = 0;
    }

    /// Record a snapshot after the current entry, dropping any redo-able future.
    ///
    /// When the log grows past its bound the oldest entry is evicted.
    pub fn push(&mut self, grid: &Grid) {
        self.entries.truncate(self.current_index + 1);
        self.entries.push(grid.clone());
        self.current_index = self.entries.len() - 1;

        if self.entries.len() > self.max_size {
            self.entries.remove(0);
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Step back one entry and return a copy of it, or `None` if already at the oldest.
    pub fn undo(&mut self) -> Option<Grid> {
        if !self.can_undo() {
            tracing::debug!("nothing to undo");
            return None;
        }
        self.current_index -= 1;
        self.entries.get(self.current_index).cloned()
    }

    /// Step forward one entry and return a copy of it, or `None` if already at the newest.
    pub fn redo(&mut self) -> Option<Grid> {
        if !self.can_redo() {
            tracing::debug!("nothing to redo");
            return None;
        }
        self.current_index += 1;
        self.entries.get(self.current_index).cloned()
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no snapshot is stored. A constructed log always holds one.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Maximum number of snapshots kept.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The current snapshot.
    pub fn current(&self) -> Option<&Grid> {
        self.entries.get(self.current_index)
    }

    /// All snapshots, oldest first.
    pub fn entries(&self) -> &[Grid] {
        &self.entries
    }

    /// Number of steps [`undo`](Self::undo) can take.
    pub fn undo_depth(&self) -> usize {
        self.current_index
    }

    /// Number of steps [`redo`](Self::redo) can take.
    pub fn redo_depth(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index + 1)
    }
}
