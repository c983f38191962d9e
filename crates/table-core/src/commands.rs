//! Command Interface Layer
//!
//! Wraps the grid operations and the history log in a single command pattern, so a frontend
//! only has to translate user intents into [`TableCommand`]s.
//!
//! # Overview
//!
//! [`CommandExecutor`] owns the live grid and its [`HistoryManager`]. Every command that
//! changes the grid records the resulting grid as a new snapshot, so the snapshot under the
//! history cursor always equals the live grid and undo/redo simply move the cursor.
//!
//! Commands that would break the "at least one row / at least one column" invariant, or that
//! name cells outside the grid, return a [`CommandError`] and leave everything untouched.
//! Undo/redo at a history boundary is not an error: it returns
//! [`CommandResult::NothingToUndo`] / [`CommandResult::NothingToRedo`].
//!
//! # Example
//!
//! ```rust
//! use table_core::{CommandExecutor, CommandResult, TableCommand};
//!
//! let mut executor = CommandExecutor::new(vec![vec!["a".into(), "b".into()]]);
//!
//! executor.execute(TableCommand::AddRow).unwrap();
//! executor.execute(TableCommand::SetCell { row: 1, col: 0, value: "c".into() }).unwrap();
//! assert_eq!(executor.grid()[1], vec!["c".to_string(), String::new()]);
//!
//! assert_eq!(executor.execute(TableCommand::Undo).unwrap(), CommandResult::Undone);
//! assert_eq!(executor.grid()[1], vec![String::new(), String::new()]);
//! ```

use crate::grid::{Grid, column_count, normalize_table_data};
use crate::history::{DEFAULT_MAX_HISTORY, HistoryManager};
use crate::table_ops::{self, cell_address};
use thiserror::Error;

/// Edit intents understood by [`CommandExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Overwrite one cell.
    SetCell {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
        /// New cell content.
        value: String,
    },
    /// Insert an empty row at `index` (or after it).
    InsertRow {
        /// Reference row.
        index: usize,
        /// Insert below the reference row instead of above it.
        after: bool,
    },
    /// Delete the row at `index`.
    DeleteRow {
        /// Row to delete.
        index: usize,
    },
    /// Move a row.
    MoveRow {
        /// Current index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// Insert an empty column at `index` (or after it).
    InsertColumn {
        /// Reference column.
        index: usize,
        /// Insert right of the reference column instead of left of it.
        after: bool,
    },
    /// Delete the column at `index`.
    DeleteColumn {
        /// Column to delete.
        index: usize,
    },
    /// Move a column.
    MoveColumn {
        /// Current index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// Append an empty row.
    AddRow,
    /// Append an empty column.
    AddColumn,
    /// Delete the last row.
    DeleteLastRow,
    /// Delete the last column.
    DeleteLastColumn,
    /// Replace the whole grid (for example after editing the raw source). The new grid is
    /// normalized first.
    ReplaceAll {
        /// Replacement grid.
        grid: Grid,
    },
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
}

impl TableCommand {
    /// Returns `true` for commands that change the grid's shape rather than a single cell.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::SetCell { .. } | Self::Undo | Self::Redo)
    }
}

/// Command execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The grid changed and a snapshot was recorded.
    Applied,
    /// The command was valid but left the grid as it was (no snapshot).
    Unchanged,
    /// The grid was restored to the previous snapshot.
    Undone,
    /// The grid was restored to the next snapshot.
    Redone,
    /// Undo was requested at the oldest snapshot.
    NothingToUndo,
    /// Redo was requested at the newest snapshot.
    NothingToRedo,
}

impl CommandResult {
    /// Returns `true` if the live grid changed.
    pub fn changed_grid(self) -> bool {
        matches!(self, Self::Applied | Self::Undone | Self::Redone)
    }
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Deleting the only row.
    #[error("at least one row must remain")]
    LastRow,
    /// Deleting the only column.
    #[error("at least one column must remain")]
    LastColumn,
    /// A row index outside the grid.
    #[error("row {index} is out of range ({len} rows)")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Row count.
        len: usize,
    },
    /// A column index outside the grid.
    #[error("column {index} is out of range ({len} columns)")]
    ColumnOutOfRange {
        /// Requested index.
        index: usize,
        /// Column count.
        len: usize,
    },
    /// A cell outside the grid.
    #[error("cell {} is out of range", address(.row, .col))]
    CellOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

fn address(row: &usize, col: &usize) -> String {
    cell_address(*row, *col)
}

/// Command executor
///
/// `CommandExecutor` is the editing interface for one table document, responsible for:
///
/// - Applying [`TableCommand`]s to the live grid
/// - Recording snapshots in the bounded history log
/// - Rejecting commands that would break the grid invariants
/// - Tracking a clean point for dirty-state detection
///
/// Snapshots are taken *after* each applied edit, not before it: the log starts with the
/// loaded grid and every change appends the resulting grid, so
/// `history().current()` is always the live grid. Callers driving a [`HistoryManager`]
/// themselves with pre-edit snapshots should not mix that log with this one.
pub struct CommandExecutor {
    grid: Grid,
    history: HistoryManager,
    /// History index of the last saved/loaded state. `None` once that state was evicted or
    /// discarded from the log.
    clean_index: Option<usize>,
}

impl CommandExecutor {
    /// Create an executor for `grid` (normalized first) with the default history bound.
    pub fn new(grid: Grid) -> Self {
        Self::with_max_history(grid, DEFAULT_MAX_HISTORY)
    }

    /// Create an executor keeping at most `max_history` snapshots.
    pub fn with_max_history(grid: Grid, max_history: usize) -> Self {
        let grid = normalize_table_data(&grid);
        let history = HistoryManager::new(&grid, max_history);
        Self {
            grid,
            history,
            clean_index: Some(0),
        }
    }

    /// Replace the live grid and restart history from it (document reload).
    pub fn reset(&mut self, grid: Grid) {
        self.grid = normalize_table_data(&grid);
        self.history.reset(&self.grid);
        self.clean_index = Some(0);
    }

    /// The live grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The history log.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Consume the executor and return the live grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of steps undo can take.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of steps redo can take.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Whether the live grid is the last saved/loaded state.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.history.current_index())
    }

    /// Mark the live grid as saved.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.history.current_index());
    }

    /// Execute command
    pub fn execute(&mut self, command: TableCommand) -> Result<CommandResult, CommandError> {
        let applied = match command {
            TableCommand::Undo => return Ok(self.undo()),
            TableCommand::Redo => return Ok(self.redo()),
            TableCommand::SetCell { row, col, value } => {
                self.check_cell(row, col)?;
                table_ops::set_cell(&mut self.grid, row, col, &value)
            }
            TableCommand::InsertRow { index, after } => {
                table_ops::insert_row(&mut self.grid, index, after)
            }
            TableCommand::DeleteRow { index } => {
                self.check_row(index)?;
                if self.grid.len() <= 1 {
                    return Err(CommandError::LastRow);
                }
                table_ops::delete_row(&mut self.grid, index)
            }
            TableCommand::MoveRow { from, to } => {
                self.check_row(from)?;
                self.check_row(to)?;
                from != to && table_ops::move_row(&mut self.grid, from, to)
            }
            TableCommand::InsertColumn { index, after } => {
                table_ops::insert_column(&mut self.grid, index, after)
            }
            TableCommand::DeleteColumn { index } => {
                self.check_column(index)?;
                if column_count(&self.grid) <= 1 {
                    return Err(CommandError::LastColumn);
                }
                table_ops::delete_column(&mut self.grid, index)
            }
            TableCommand::MoveColumn { from, to } => {
                self.check_column(from)?;
                self.check_column(to)?;
                from != to && table_ops::move_column(&mut self.grid, from, to)
            }
            TableCommand::AddRow => table_ops::add_row(&mut self.grid),
            TableCommand::AddColumn => table_ops::add_column(&mut self.grid),
            TableCommand::DeleteLastRow => {
                if self.grid.len() <= 1 {
                    return Err(CommandError::LastRow);
                }
                table_ops::delete_last_row(&mut self.grid)
            }
            TableCommand::DeleteLastColumn => {
                if column_count(&self.grid) <= 1 {
                    return Err(CommandError::LastColumn);
                }
                table_ops::delete_last_column(&mut self.grid)
            }
            TableCommand::ReplaceAll { grid } => {
                let grid = normalize_table_data(&grid);
                if grid == self.grid {
                    false
                } else {
                    self.grid = grid;
                    true
                }
            }
        };

        if applied {
            self.record_snapshot();
            Ok(CommandResult::Applied)
        } else {
            Ok(CommandResult::Unchanged)
        }
    }

    /// Batch execute commands, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<TableCommand>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::with_capacity(commands.len());
        for command in commands {
            results.push(self.execute(command)?);
        }
        Ok(results)
    }

    fn undo(&mut self) -> CommandResult {
        match self.history.undo() {
            Some(grid) => {
                self.grid = grid;
                CommandResult::Undone
            }
            None => CommandResult::NothingToUndo,
        }
    }

    fn redo(&mut self) -> CommandResult {
        match self.history.redo() {
            Some(grid) => {
                self.grid = grid;
                CommandResult::Redone
            }
            None => CommandResult::NothingToRedo,
        }
    }

    fn record_snapshot(&mut self) {
        let index_before = self.history.current_index();
        self.history.push(&self.grid);

        let Some(clean_index) = self.clean_index else {
            return;
        };

        // The clean point was in the discarded redo future.
        if clean_index > index_before {
            self.clean_index = None;
            return;
        }

        let evicted = self.history.len() < index_before + 2;
        if evicted {
            self.clean_index = clean_index.checked_sub(1);
        }
    }

    fn check_row(&self, index: usize) -> Result<(), CommandError> {
        if index < self.grid.len() {
            Ok(())
        } else {
            Err(CommandError::RowOutOfRange {
                index,
                len: self.grid.len(),
            })
        }
    }

    fn check_column(&self, index: usize) -> Result<(), CommandError> {
        let len = column_count(&self.grid);
        if index < len {
            Ok(())
        } else {
            Err(CommandError::ColumnOutOfRange { index, len })
        }
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<(), CommandError> {
        if row < self.grid.len() && col < column_count(&self.grid) {
            Ok(())
        } else {
            Err(CommandError::CellOutOfRange { row, col })
        }
    }
}
