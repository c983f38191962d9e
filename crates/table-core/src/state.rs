//! Table Document State
//!
//! Owns one open table document: its raw text, parse settings, live grid and history, and
//! exposes structured state for the frontend.
//!
//! # Overview
//!
//! [`TableStateManager`] wraps a [`CommandExecutor`] and adds:
//!
//! - **Loading**: parse raw text (sniffing the delimiter if asked) and restart history
//! - **Reparsing**: re-read the last loaded text after the settings change, as an undoable edit
//! - **Version Tracking**: a version number incremented on every visible change
//! - **Change Notifications**: subscribers are called after each change
//! - **Saving**: serialize the grid with the document's resolved dialect
//!
//! # Example
//!
//! ```rust
//! use table_core::{Delimiter, ParseConfig, TableCommand, TableStateManager};
//!
//! let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
//! let mut manager = TableStateManager::new("a;b\n1;2", config);
//! assert_eq!(manager.delimiter(), ';');
//!
//! manager.subscribe(|change| {
//!     println!("State changed: {:?}", change.change_type);
//! });
//!
//! manager
//!     .execute(TableCommand::SetCell { row: 1, col: 1, value: "3".into() })
//!     .unwrap();
//! assert!(manager.get_document_state().is_modified);
//! assert_eq!(manager.text_for_saving(), "a;b\n1;3");
//! ```

use crate::codec::{ParseWarning, parse_table, unparse_csv};
use crate::commands::{CommandError, CommandExecutor, CommandResult, TableCommand};
use crate::config::{Delimiter, ParseConfig};
use crate::error::ParseError;
use crate::grid::{Grid, column_count};
use crate::history::DEFAULT_MAX_HISTORY;

/// Document state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Number of rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Delimiter in effect (resolved if the settings ask for auto-detection).
    pub delimiter: char,
    /// Whether the grid differs from the last loaded/saved state.
    pub is_modified: bool,
    /// Document version number (incremented after each change).
    pub version: u64,
    /// Number of warnings from the last parse.
    pub warning_count: usize,
    /// Whether the last parse failed and the grid is the fallback one-cell grid.
    pub parse_failed: bool,
}

/// Undo/redo state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRedoState {
    /// Can undo
    pub can_undo: bool,
    /// Can redo
    pub can_redo: bool,
    /// Steps available to undo.
    pub undo_depth: usize,
    /// Steps available to redo.
    pub redo_depth: usize,
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// The document was (re)loaded or reparsed with new settings.
    DocumentLoaded,
    /// A single cell was written.
    CellEdited,
    /// Rows or columns were inserted, deleted, moved, or the grid was replaced.
    StructureChanged,
    /// Undo or redo restored a snapshot.
    HistoryRestored,
}

/// State change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// The edited cell for [`StateChangeType::CellEdited`].
    pub cell: Option<(usize, usize)>,
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Table document state manager
pub struct TableStateManager {
    executor: CommandExecutor,
    config: ParseConfig,
    /// Text the grid was last loaded from (or saved as).
    raw_text: String,
    delimiter: char,
    warnings: Vec<ParseWarning>,
    parse_failed: bool,
    state_version: u64,
    callbacks: Vec<StateChangeCallback>,
}

impl TableStateManager {
    /// Parse `text` with `config` and open it as a document.
    pub fn new(text: &str, config: ParseConfig) -> Self {
        Self::with_max_history(text, config, DEFAULT_MAX_HISTORY)
    }

    /// Like [`new`](Self::new), keeping at most `max_history` snapshots.
    pub fn with_max_history(text: &str, config: ParseConfig, max_history: usize) -> Self {
        let output = parse_table(text, &config);
        Self {
            executor: CommandExecutor::with_max_history(output.grid, max_history),
            config,
            raw_text: text.to_string(),
            delimiter: output.delimiter,
            warnings: output.warnings,
            parse_failed: output.failed,
            state_version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Reload the document from `text`, discarding history.
    pub fn load(&mut self, text: &str) {
        let output = parse_table(text, &self.config);
        self.raw_text = text.to_string();
        self.delimiter = output.delimiter;
        self.warnings = output.warnings;
        self.parse_failed = output.failed;
        self.executor.reset(output.grid);
        self.bump_version(StateChangeType::DocumentLoaded, None);
    }

    /// Replace the parse settings. Takes effect on the next [`reparse`](Self::reparse) or
    /// [`load`](Self::load); saving uses the new dialect immediately.
    ///
    /// A dialect that cannot be read back is rejected and the current settings are kept.
    pub fn set_config(&mut self, config: ParseConfig) -> Result<(), ParseError> {
        config.validate()?;
        self.config = config;
        if let Some(delimiter) = config.delimiter.as_char() {
            self.delimiter = delimiter;
        }
        Ok(())
    }

    /// Re-parse the last loaded text with the current settings, keeping history.
    ///
    /// The reparsed grid is recorded as an undoable change. Returns `true` if the grid changed.
    /// A parse that falls back to the one-cell grid leaves the document untouched.
    pub fn reparse(&mut self) -> bool {
        let output = parse_table(&self.raw_text, &self.config);
        if output.failed {
            tracing::warn!(delimiter = ?output.delimiter, "reparse failed, keeping current grid");
            return false;
        }
        self.delimiter = output.delimiter;
        self.warnings = output.warnings;
        self.parse_failed = output.failed;

        match self.executor.execute(TableCommand::ReplaceAll { grid: output.grid }) {
            Ok(CommandResult::Applied) => {
                self.bump_version(StateChangeType::DocumentLoaded, None);
                true
            }
            _ => false,
        }
    }

    /// Execute a command and notify subscribers if the grid changed.
    pub fn execute(&mut self, command: TableCommand) -> Result<CommandResult, CommandError> {
        let (change_type, cell) = match &command {
            TableCommand::Undo | TableCommand::Redo => (StateChangeType::HistoryRestored, None),
            TableCommand::SetCell { row, col, .. } => {
                (StateChangeType::CellEdited, Some((*row, *col)))
            }
            _ => (StateChangeType::StructureChanged, None),
        };

        let result = self.executor.execute(command)?;
        if result.changed_grid() {
            self.bump_version(change_type, cell);
        }
        Ok(result)
    }

    /// Serialize the grid with the document's dialect.
    pub fn text_for_saving(&self) -> String {
        let config = self.config.with_delimiter(Delimiter::Char(self.delimiter));
        unparse_csv(self.executor.grid(), &config)
    }

    /// Record that the current grid was written out.
    pub fn mark_saved(&mut self) {
        self.raw_text = self.text_for_saving();
        self.executor.mark_clean();
    }

    /// Subscribe to state changes
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.state_version > version
    }

    /// Get current version number
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// The live grid.
    pub fn grid(&self) -> &Grid {
        self.executor.grid()
    }

    /// The command executor.
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// The parse settings.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// The delimiter in effect.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Warnings from the last parse.
    pub fn last_warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Get document state
    pub fn get_document_state(&self) -> DocumentState {
        let grid = self.executor.grid();
        DocumentState {
            row_count: grid.len(),
            column_count: column_count(grid),
            delimiter: self.delimiter,
            is_modified: !self.executor.is_clean(),
            version: self.state_version,
            warning_count: self.warnings.len(),
            parse_failed: self.parse_failed,
        }
    }

    /// Get undo/redo state
    pub fn get_undo_redo_state(&self) -> UndoRedoState {
        UndoRedoState {
            can_undo: self.executor.can_undo(),
            can_redo: self.executor.can_redo(),
            undo_depth: self.executor.undo_depth(),
            redo_depth: self.executor.redo_depth(),
        }
    }

    fn bump_version(&mut self, change_type: StateChangeType, cell: Option<(usize, usize)>) {
        let old_version = self.state_version;
        self.state_version += 1;

        let change = StateChange {
            change_type,
            old_version,
            new_version: self.state_version,
            cell,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
