#![warn(missing_docs)]
//! Table Core - Headless Table-Document Engine
//!
//! # Overview
//!
//! `table-core` is the engine behind an interactive delimited-text (CSV/TSV) table editor.
//! It does not render anything: the upper layer shows the grid and turns user input into
//! commands, while this crate keeps the data correct.
//!
//! # Core Features
//!
//! - **Dialect Detection**: sniffs comma, semicolon, tab or pipe delimiters, quote-aware
//! - **Lossless Codec**: quoted fields, embedded delimiters and line breaks, doubled quotes;
//!   serialized grids re-parse to the identical grid
//! - **Rectangular Grids**: normalization pads ragged rows; mutations never remove the last
//!   row or column
//! - **Bounded History**: whole-grid snapshots with undo/redo and a configurable bound
//! - **State Tracking**: version numbers, dirty tracking and change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  State Management (TableStateManager)       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Command Interface (CommandExecutor)        │  ← Edit intents
//! ├─────────────────────────────────────────────┤
//! │  History (HistoryManager)                   │  ← Undo/redo
//! ├─────────────────────────────────────────────┤
//! │  Grid Operations (table_ops, grid)          │  ← Mutations
//! ├─────────────────────────────────────────────┤
//! │  CSV Codec + Dialect Detection              │  ← Text <-> Grid
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using Command Interface
//!
//! ```rust
//! use table_core::{CommandExecutor, ParseConfig, TableCommand, parse_table, unparse_csv};
//!
//! let config = ParseConfig::default();
//! let output = parse_table("name,age\nAlice,30", &config);
//! let mut executor = CommandExecutor::new(output.grid);
//!
//! executor.execute(TableCommand::InsertColumn { index: 1, after: true }).unwrap();
//! executor.execute(TableCommand::SetCell { row: 0, col: 2, value: "email".into() }).unwrap();
//!
//! assert_eq!(unparse_csv(executor.grid(), &config), "name,age,email\nAlice,30,");
//! ```
//!
//! ## Using the codec directly
//!
//! ```rust
//! use table_core::{ParseConfig, detect_delimiter, parse_csv};
//!
//! assert_eq!(detect_delimiter("a\tb\n1\t2", '"'), '\t');
//!
//! let output = parse_csv("name,description\n\"John Doe\",\"A person, with comma\"", &ParseConfig::default());
//! assert_eq!(output.grid[1][1], "A person, with comma");
//! ```
//!
//! # Module Description
//!
//! - [`dialect`] - Delimiter sniffing
//! - [`codec`] - Parsing and serialization
//! - [`grid`] - Grid type and normalization
//! - [`table_ops`] - Row/column operations and cell addresses
//! - [`history`] - Bounded undo/redo log
//! - [`commands`] - Unified command interface
//! - [`state`] - Document state management and notifications
//! - [`search`] - Cell search

pub mod codec;
pub mod commands;
pub mod config;
pub mod dialect;
mod error;
pub mod grid;
pub mod history;
pub mod search;
pub mod state;
pub mod table_ops;

pub use codec::{
    ParseOutput, ParseWarning, ParseWarningKind, parse_csv, parse_table, try_parse_csv,
    unparse_csv,
};
pub use commands::{CommandError, CommandExecutor, CommandResult, TableCommand};
pub use config::{Delimiter, ParseConfig};
pub use dialect::{DEFAULT_DELIMITER, DELIMITER_CANDIDATES, detect_delimiter};
pub use error::{ConfigError, ParseError};
pub use grid::{Grid, normalize_table_data};
pub use history::{DEFAULT_MAX_HISTORY, HistoryManager};
pub use search::{CellMatch, SearchError, SearchOptions, find_cells};
pub use state::{
    DocumentState, StateChange, StateChangeCallback, StateChangeType, TableStateManager,
    UndoRedoState,
};
pub use table_ops::{
    add_column, add_row, cell_address, column_label, delete_column, delete_last_column,
    delete_last_row, delete_row, insert_column, insert_row, move_column, move_row,
    parse_cell_address, set_cell, swap_columns, swap_rows,
};
