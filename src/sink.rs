//! Output collaborator seam.
//!
//! The decode ends at a sparse grid of typed values; turning that grid into
//! any concrete spreadsheet representation is the sink's business, not this
//! crate's.

use crate::cell::CellValue;

/// Accepts a sparse coordinate-to-value mapping, one cell at a time in
/// row-major order.
pub trait SpreadsheetSink {
    fn write_cell(&mut self, row: u32, col: u32, value: &CellValue);
}
