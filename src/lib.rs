//! Longan - A Rust library for decoding Excel binary workbooks (.xlsb)
//!
//! XLSB files are ZIP containers holding BIFF12 binary record streams. This
//! library decodes the two streams that carry cell content — the shared-string
//! table and a worksheet — into a sparse grid of typed values. It deliberately
//! stops there: opening the container and rendering the grid into an output
//! format are collaborator seams ([`ArchiveReader`] and [`SpreadsheetSink`]),
//! and formatting, formulas and multi-sheet orchestration are out of scope.
//!
//! # Example - Decoding the first worksheet
//!
//! ```no_run
//! use longan::Workbook;
//! use std::fs::File;
//!
//! # fn main() -> longan::Result<()> {
//! let file = File::open("workbook.xlsb")?;
//! let mut workbook = Workbook::open(file)?;
//! let sheet = workbook.decode_first_sheet()?;
//!
//! for (row, cells) in sheet.rows() {
//!     for (col, value) in cells {
//!         println!("({row}, {col}) = {value:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Supplying streams from a custom container
//!
//! ```
//! use longan::{DecodeConfig, SharedStrings, decode_worksheet};
//!
//! // Streams obtained elsewhere, already fully buffered.
//! let strings_stream: &[u8] = &[];
//! let sheet_stream: &[u8] = &[];
//!
//! let config = DecodeConfig::default();
//! let strings = SharedStrings::parse(strings_stream, config.max_string_len);
//! let (grid, stats) = decode_worksheet(sheet_stream, &strings, config);
//! assert!(grid.is_empty() && stats.cells == 0);
//! ```
//!
//! # Malformed input
//!
//! Truncated records, implausible string lengths and out-of-range
//! shared-string indices are absorbed where they occur: the affected record
//! is dropped and the scan continues. Only two conditions fail a decode —
//! a container that cannot be opened as a ZIP archive, and a container with
//! no worksheet stream.

/// Little-endian primitive readers shared by the record decoders
mod binary;

/// Typed cell values, the sparse grid and decode counters
pub mod cell;

/// Error types for workbook decoding
pub mod error;

/// Container access: the archive collaborator seam and its ZIP implementation
pub mod package;

/// BIFF12 record scanning and primitive payload decoders
pub mod records;

/// Shared-string table reconstruction
pub mod shared_strings;

/// Output collaborator seam
pub mod sink;

/// Workbook-level orchestration
pub mod workbook;

/// Worksheet stream reconstruction
pub mod worksheet;

#[cfg(test)]
mod testutil;

pub use cell::{CellError, CellValue, DecodeStats, Grid, Rows};
pub use error::{Error, Result};
pub use package::{ArchiveReader, ZipPackage};
// Re-export the low-level record iterator for diagnostics and advanced users.
pub use records::{Record, RecordIter};
pub use shared_strings::SharedStrings;
pub use sink::SpreadsheetSink;
pub use workbook::{DecodedSheet, Workbook};
pub use worksheet::{DecodeConfig, decode_worksheet};
