//! The grid: rows of string cells.

/// A table of string cells, row-major.
///
/// After [`normalize_table_data`] every row has the same number of cells and there is at
/// least one row and one column.
pub type Grid = Vec<Vec<String>>;

/// The smallest valid grid: one row holding one empty cell.
pub fn empty_grid() -> Grid {
    vec![vec![String::new()]]
}

/// Number of columns, taken from the first row.
pub fn column_count(grid: &[Vec<String>]) -> usize {
    grid.first().map_or(0, Vec::len)
}

/// Returns `true` if every row has the same length as the first.
pub fn is_rectangular(grid: &[Vec<String>]) -> bool {
    let width = column_count(grid);
    grid.iter().all(|row| row.len() == width)
}

/// Pad every row on the right with empty cells up to the longest row.
///
/// An empty grid becomes [`empty_grid`]. The target width is the longest row, but never
/// less than one: input made only of zero-length rows (such as `[[]]`) is widened to a single
/// empty cell per row so the grid always keeps one column.
pub fn normalize_table_data(grid: &[Vec<String>]) -> Grid {
    if grid.is_empty() {
        return empty_grid();
    }

    let max_cols = grid.iter().map(Vec::len).max().unwrap_or(0).max(1);
    grid.iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(max_cols, String::new());
            row
        })
        .collect()
}
