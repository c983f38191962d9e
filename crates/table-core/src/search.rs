//! Cell search.
//!
//! Finds the cells of a grid whose content matches a query, in row-major order. Plain
//! queries are escaped and compiled into a regex, so one matcher covers every search mode.

use crate::table_ops::cell_address;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search. Off by default.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

/// A cell whose content matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMatch {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Spreadsheet address of the cell, such as `B3`.
    pub address: String,
}

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    let pattern = if options.whole_word {
        format!(r"\b(?:{pattern})\b")
    } else {
        pattern
    };

    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()?)
}

/// Find every cell of `grid` containing `query`.
///
/// The query is trimmed first; an empty query matches nothing.
pub fn find_cells(
    grid: &[Vec<String>],
    query: &str,
    options: SearchOptions,
) -> Result<Vec<CellMatch>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_search_regex(query, options)?;
    let re = &re;
    let matches = grid
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, cell)| re.is_match(cell))
                .map(move |(col, _)| CellMatch {
                    row,
                    col,
                    address: cell_address(row, col),
                })
        })
        .collect();

    Ok(matches)
}
