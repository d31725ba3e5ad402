//! Typed cell values, the sparse grid and decode counters.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::iter::Peekable;

/// Excel error literals carried by error cells.
///
/// Error cells store a single code byte; codes outside the documented table
/// collapse to [`CellError::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    /// `#NULL!` (code 0x00)
    Null,
    /// `#DIV/0!` (code 0x07)
    DivZero,
    /// `#VALUE!` (code 0x0F)
    Value,
    /// `#REF!` (code 0x17)
    Ref,
    /// `#NAME?` (code 0x1D)
    Name,
    /// `#NUM!` (code 0x24)
    Num,
    /// `#N/A` (code 0x2A)
    NotAvailable,
    /// Any code not in the table
    Unknown,
}

impl CellError {
    /// Map a BIFF12 error code byte to its symbol.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => CellError::Null,
            0x07 => CellError::DivZero,
            0x0F => CellError::Value,
            0x17 => CellError::Ref,
            0x1D => CellError::Name,
            0x24 => CellError::Num,
            0x2A => CellError::NotAvailable,
            _ => CellError::Unknown,
        }
    }

    /// The Excel display literal for this error.
    pub fn as_str(self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::DivZero => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::NotAvailable => "#N/A",
            CellError::Unknown => "#ERROR!",
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded cell value.
///
/// There is no null state beyond absence from the grid: a coordinate either
/// maps to one of these or is not present at all.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit floating point number
    Number(f64),
    /// String value
    Text(String),
    /// Error value
    Error(CellError),
}

/// Sparse mapping from `(row, column)` to decoded values.
///
/// Indices are 0-based, matching the format's own row headers and column
/// fields. Inserting at an occupied coordinate replaces the previous value;
/// iteration is row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Grid::default()
    }

    /// Write a value at `(row, col)`, replacing any previous value there.
    pub fn insert(&mut self, row: u32, col: u32, value: CellValue) {
        self.cells.insert((row, col), value);
    }

    /// Get the value at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate populated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }

    /// Iterate populated rows in ascending order, each with its cells in
    /// ascending column order.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            iter: self.cells.iter().peekable(),
        }
    }
}

impl IntoIterator for Grid {
    type Item = ((u32, u32), CellValue);
    type IntoIter = btree_map::IntoIter<(u32, u32), CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Row-grouping iterator over a [`Grid`], see [`Grid::rows`].
///
/// The grid is already complete when this is constructed; dropping the
/// iterator early skips delivery of the remaining rows, nothing more.
pub struct Rows<'a> {
    iter: Peekable<btree_map::Iter<'a, (u32, u32), CellValue>>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = (u32, Vec<(u32, &'a CellValue)>);

    fn next(&mut self) -> Option<Self::Item> {
        let (&(row, col), value) = self.iter.next()?;
        let mut cells = vec![(col, value)];
        while let Some(&(&(r, c), v)) = self.iter.peek() {
            if r != row {
                break;
            }
            cells.push((c, v));
            self.iter.next();
        }
        Some((row, cells))
    }
}

/// Row and cell counters accumulated as a side effect of grid population.
///
/// Purely observational: both counters only grow during a single decode
/// pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Row header records seen
    pub rows: usize,
    /// Cell values written to the grid
    pub cells: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_table() {
        assert_eq!(CellError::from_code(0x07), CellError::DivZero);
        assert_eq!(CellError::from_code(0x07).as_str(), "#DIV/0!");
        assert_eq!(CellError::from_code(0x2A).as_str(), "#N/A");
        // Unlisted codes map to the generic literal
        assert_eq!(CellError::from_code(0xFF), CellError::Unknown);
        assert_eq!(CellError::from_code(0xFF).as_str(), "#ERROR!");
        assert_eq!(CellError::DivZero.to_string(), "#DIV/0!");
    }

    #[test]
    fn test_grid_last_write_wins() {
        let mut grid = Grid::new();
        grid.insert(3, 1, CellValue::Number(1.0));
        grid.insert(3, 1, CellValue::Text("replaced".into()));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(3, 1), Some(&CellValue::Text("replaced".into())));
    }

    #[test]
    fn test_grid_iteration_is_row_major() {
        let mut grid = Grid::new();
        grid.insert(1, 0, CellValue::Number(3.0));
        grid.insert(0, 5, CellValue::Number(2.0));
        grid.insert(0, 1, CellValue::Number(1.0));
        let order: Vec<(u32, u32)> = grid.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 1), (0, 5), (1, 0)]);
    }

    #[test]
    fn test_rows_grouping() {
        let mut grid = Grid::new();
        grid.insert(0, 0, CellValue::Bool(true));
        grid.insert(0, 2, CellValue::Empty);
        grid.insert(7, 1, CellValue::Number(4.5));
        let rows: Vec<(u32, Vec<u32>)> = grid
            .rows()
            .map(|(row, cells)| (row, cells.into_iter().map(|(c, _)| c).collect()))
            .collect();
        assert_eq!(rows, vec![(0, vec![0, 2]), (7, vec![1])]);
    }
}
