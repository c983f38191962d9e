//! Structural grid operations and spreadsheet-style coordinates.
//!
//! Every operation mutates the grid in place and returns `true` if it was applied. An
//! operation that would leave the grid without a row or a column, or that names an index
//! outside the grid, returns `false` and leaves the grid untouched. Nothing here records
//! history; callers snapshot through [`crate::HistoryManager`] (or use
//! [`crate::CommandExecutor`], which does it for them).

use crate::grid::{Grid, column_count};

fn empty_row(width: usize) -> Vec<String> {
    vec![String::new(); width.max(1)]
}

/// Insert an empty row at `index`, or after it when `after` is set.
///
/// The target index is clamped to `[0, row_count]`.
pub fn insert_row(grid: &mut Grid, index: usize, after: bool) -> bool {
    let target = if after { index.saturating_add(1) } else { index };
    let target = target.min(grid.len());
    let width = column_count(grid);
    grid.insert(target, empty_row(width));
    true
}

/// Append an empty row.
pub fn add_row(grid: &mut Grid) -> bool {
    insert_row(grid, grid.len(), false)
}

/// Remove the row at `index`. The last remaining row is never removed.
pub fn delete_row(grid: &mut Grid, index: usize) -> bool {
    if grid.len() <= 1 || index >= grid.len() {
        tracing::debug!(index, rows = grid.len(), "delete_row rejected");
        return false;
    }
    grid.remove(index);
    true
}

/// Remove the last row, keeping at least one.
pub fn delete_last_row(grid: &mut Grid) -> bool {
    match grid.len().checked_sub(1) {
        Some(last) => delete_row(grid, last),
        None => false,
    }
}

/// Insert an empty cell into every row at `index`, or after it when `after` is set.
///
/// The target index is clamped to `[0, column_count]`.
pub fn insert_column(grid: &mut Grid, index: usize, after: bool) -> bool {
    let target = if after { index.saturating_add(1) } else { index };
    if grid.is_empty() {
        grid.push(Vec::new());
    }
    for row in grid.iter_mut() {
        let at = target.min(row.len());
        row.insert(at, String::new());
    }
    true
}

/// Append an empty column.
pub fn add_column(grid: &mut Grid) -> bool {
    insert_column(grid, column_count(grid), false)
}

/// Remove the column at `index` from every row. The last remaining column is never removed.
pub fn delete_column(grid: &mut Grid, index: usize) -> bool {
    let width = column_count(grid);
    if width <= 1 || index >= width {
        tracing::debug!(index, columns = width, "delete_column rejected");
        return false;
    }
    for row in grid.iter_mut() {
        if index < row.len() {
            row.remove(index);
        }
    }
    true
}

/// Remove the last column, keeping at least one.
pub fn delete_last_column(grid: &mut Grid) -> bool {
    match column_count(grid).checked_sub(1) {
        Some(last) => delete_column(grid, last),
        None => false,
    }
}

/// Move the row at `from` so that it ends up at index `to`.
pub fn move_row(grid: &mut Grid, from: usize, to: usize) -> bool {
    if from >= grid.len() || to >= grid.len() {
        return false;
    }
    let row = grid.remove(from);
    grid.insert(to, row);
    true
}

/// Move the column at `from` so that it ends up at index `to`, in every row.
pub fn move_column(grid: &mut Grid, from: usize, to: usize) -> bool {
    let width = column_count(grid);
    if from >= width || to >= width {
        return false;
    }
    for row in grid.iter_mut() {
        if from < row.len() && to < row.len() {
            let cell = row.remove(from);
            row.insert(to, cell);
        }
    }
    true
}

/// Exchange rows `a` and `b`.
pub fn swap_rows(grid: &mut Grid, a: usize, b: usize) -> bool {
    if a >= grid.len() || b >= grid.len() {
        return false;
    }
    grid.swap(a, b);
    true
}

/// Exchange columns `a` and `b` in every row.
pub fn swap_columns(grid: &mut Grid, a: usize, b: usize) -> bool {
    let width = column_count(grid);
    if a >= width || b >= width {
        return false;
    }
    for row in grid.iter_mut() {
        if a < row.len() && b < row.len() {
            row.swap(a, b);
        }
    }
    true
}

/// Overwrite a single cell. Returns `false` if out of range or if the value is unchanged.
pub fn set_cell(grid: &mut Grid, row: usize, col: usize, value: &str) -> bool {
    match grid.get_mut(row).and_then(|r| r.get_mut(col)) {
        Some(cell) if cell.as_str() != value => {
            value.clone_into(cell);
            true
        }
        _ => false,
    }
}

/// Spreadsheet column label for a zero-based index: `A`..`Z`, `AA`..`AZ`, `BA`, ...
///
/// This is bijective base-26: there is no zero digit, so `Z` (25) is followed by `AA` (26).
pub fn column_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Spreadsheet cell address: column label followed by the one-based row number (`B3`).
pub fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col), row + 1)
}

/// Parse a cell address such as `B3` (case-insensitive) into zero-based `(row, col)`.
pub fn parse_cell_address(address: &str) -> Option<(usize, usize)> {
    let address = address.trim();
    let split = address.find(|c: char| !c.is_ascii_alphabetic())?;
    let (letters, digits) = address.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut col: usize = 0;
    for b in letters.bytes() {
        let digit = usize::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }

    let row: usize = digits.parse().ok()?;
    Some((row.checked_sub(1)?, col - 1))
}
