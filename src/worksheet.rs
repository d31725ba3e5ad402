//! Worksheet stream reconstruction.
//!
//! A single linear scan over the sheet stream, not a grammar: the only
//! context carried between records is the most recent row header. Cell
//! records name their column but inherit the row, so a cell seen before any
//! row header has no coordinate and is dropped. Records whose payload falls
//! short of their tag's minimum are dropped whole — no partial writes reach
//! the grid.

use log::{debug, warn};

use crate::binary::{read_f64_le, read_u32_le};
use crate::cell::{CellError, CellValue, DecodeStats, Grid};
use crate::records::{DEFAULT_MAX_STRING_LEN, RecordIter, rk_to_f64, tags, wide_str};
use crate::shared_strings::SharedStrings;

/// Candidate payload offsets for the string-table index of a shared-string
/// cell, probed in order. The variants likely differ in which style fields
/// sit between the column and the index, and the bytes themselves do not say
/// which variant a record uses — the first offset whose value is in range
/// for the table wins.
const ISST_INDEX_OFFSETS: [usize; 3] = [8, 4, 6];

/// Decode limits, passed explicitly by the caller rather than read from any
/// ambient process setting.
#[derive(Debug, Clone, Copy)]
pub struct DecodeConfig {
    /// Ceiling on declared wide-string character counts; larger counts are
    /// treated as a mis-identified payload layout, not a valid string.
    pub max_string_len: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

/// Decode one worksheet stream into a grid, resolving shared-string indices
/// against `shared`.
///
/// Infallible by design: every structural or semantic anomaly is absorbed by
/// dropping the affected record. The returned grid is the complete, final
/// result for this stream.
pub fn decode_worksheet(
    stream: &[u8],
    shared: &SharedStrings,
    config: DecodeConfig,
) -> (Grid, DecodeStats) {
    let mut grid = Grid::new();
    let mut stats = DecodeStats::default();
    let mut current_row: Option<u32> = None;
    let mut in_sheet_data = false;

    for record in RecordIter::new(stream) {
        let data = record.data;
        match record.record_type {
            tags::ROW_HDR => {
                if let Some(row) = read_u32_le(data, 0) {
                    current_row = Some(row);
                    stats.rows += 1;
                }
            }
            tags::BEGIN_SHEET_DATA => in_sheet_data = true,
            tags::END_SHEET_DATA => in_sheet_data = false,
            tags::CELL_ISST
            | tags::CELL_ST
            | tags::CELL_REAL
            | tags::CELL_RK
            | tags::CELL_BOOL
            | tags::CELL_ERROR => {
                // No row header yet means no coordinate to place the cell.
                let Some(row) = current_row else { continue };
                let Some(col) = read_u32_le(data, 0) else {
                    continue;
                };
                if !in_sheet_data {
                    debug!(
                        "cell record 0x{:04X} outside the sheet-data block",
                        record.record_type
                    );
                }
                if let Some(value) = decode_cell(record.record_type, data, shared, &config) {
                    grid.insert(row, col, value);
                    stats.cells += 1;
                }
            }
            // Blank cells, dimensions, styles: nothing for the grid.
            _ => {}
        }
    }

    debug!(
        "worksheet decode: {} rows, {} cells written",
        stats.rows, stats.cells
    );
    (grid, stats)
}

/// Decode a cell record's value, or `None` when the record is too short,
/// unresolvable or empty by the rules of its tag.
fn decode_cell(
    tag: u16,
    data: &[u8],
    shared: &SharedStrings,
    config: &DecodeConfig,
) -> Option<CellValue> {
    match tag {
        tags::CELL_ISST => {
            for &offset in &ISST_INDEX_OFFSETS {
                if let Some(index) = read_u32_le(data, offset)
                    && let Some(s) = shared.get(index as usize)
                {
                    return Some(CellValue::Text(s.to_owned()));
                }
            }
            warn!("shared-string cell with no in-range table index; dropped");
            None
        }
        tags::CELL_ST => {
            // An in-range index at offset 8 that resolves to a non-empty
            // string outranks an inline decode of the same bytes.
            if let Some(index) = read_u32_le(data, 8)
                && let Some(s) = shared.get(index as usize)
                && !s.is_empty()
            {
                return Some(CellValue::Text(s.to_owned()));
            }
            let s = wide_str(data.get(8..)?, config.max_string_len)?;
            (!s.is_empty()).then(|| CellValue::Text(s))
        }
        tags::CELL_REAL => {
            if data.len() < 16 {
                return None;
            }
            read_f64_le(data, 8).map(CellValue::Number)
        }
        tags::CELL_RK => {
            if data.len() < 12 {
                return None;
            }
            read_u32_le(data, 8).map(|rk| CellValue::Number(rk_to_f64(rk)))
        }
        tags::CELL_BOOL => {
            if data.len() < 9 {
                return None;
            }
            Some(CellValue::Bool(data[8] != 0))
        }
        tags::CELL_ERROR => {
            if data.len() < 9 {
                return None;
            }
            Some(CellValue::Error(CellError::from_code(data[8])))
        }
        _ => None,
    }
}
