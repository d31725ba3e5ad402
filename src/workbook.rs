//! Workbook-level orchestration.
//!
//! Locates the two content streams in the container, runs the shared-strings
//! pass and then the worksheet pass, and hands back the finished grid. Both
//! passes run eagerly over fully-buffered streams; the row iterator on the
//! result only walks what has already been decoded.

use std::io::{Read, Seek};

use bytes::Bytes;
use log::debug;

use crate::cell::{DecodeStats, Grid, Rows};
use crate::error::{Error, Result};
use crate::package::{ArchiveReader, ZipPackage};
use crate::shared_strings::SharedStrings;
use crate::sink::SpreadsheetSink;
use crate::worksheet::{DecodeConfig, decode_worksheet};

/// Conventional container path of the shared-strings stream.
pub const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.bin";

/// Conventional container paths of the first worksheet stream, tried in
/// order; both casings occur in the wild.
pub const WORKSHEET_PATHS: [&str; 2] = ["xl/worksheets/sheet1.bin", "xl/worksheets/Sheet1.bin"];

/// An XLSB workbook backed by an archive reader.
pub struct Workbook<A: ArchiveReader> {
    archive: A,
    config: DecodeConfig,
}

impl<RS: Read + Seek> Workbook<ZipPackage<RS>> {
    /// Open a workbook from a ZIP container.
    ///
    /// Fails here, before any record parsing, when the bytes are not a
    /// readable ZIP archive.
    pub fn open(reader: RS) -> Result<Self> {
        Ok(Workbook::new(ZipPackage::open(reader)?))
    }
}

impl<A: ArchiveReader> Workbook<A> {
    /// Wrap an already-open archive with default decode limits.
    pub fn new(archive: A) -> Self {
        Workbook {
            archive,
            config: DecodeConfig::default(),
        }
    }

    /// Wrap an already-open archive with explicit decode limits.
    pub fn with_config(archive: A, config: DecodeConfig) -> Self {
        Workbook { archive, config }
    }

    /// Decode the first worksheet into a grid.
    ///
    /// The shared-strings stream is optional (its absence yields an empty
    /// table); a missing worksheet stream fails the decode, and no partial
    /// grid is returned.
    pub fn decode_first_sheet(&mut self) -> Result<DecodedSheet> {
        let shared = match self.archive.read_entry(SHARED_STRINGS_PATH)? {
            Some(blob) => SharedStrings::parse(&blob, self.config.max_string_len),
            None => {
                debug!("no shared-strings stream; using an empty table");
                SharedStrings::default()
            }
        };

        let stream = self.worksheet_stream()?;
        let (grid, stats) = decode_worksheet(&stream, &shared, self.config);
        Ok(DecodedSheet { grid, stats })
    }

    fn worksheet_stream(&mut self) -> Result<Bytes> {
        for path in WORKSHEET_PATHS {
            if let Some(blob) = self.archive.read_entry(path)? {
                return Ok(blob);
            }
        }
        Err(Error::StreamNotFound(WORKSHEET_PATHS[0].to_string()))
    }
}

/// The complete, final result of one decode pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSheet {
    grid: Grid,
    stats: DecodeStats,
}

impl DecodedSheet {
    /// The decoded grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row and cell counters from the decode pass.
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Consume the sheet, keeping only the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Iterate rows in ascending order.
    ///
    /// The decode has already completed by the time this is called, so
    /// dropping the iterator early stops delivery, not work.
    pub fn rows(&self) -> Rows<'_> {
        self.grid.rows()
    }

    /// Render every populated cell into `sink`, row-major.
    pub fn render_to<S: SpreadsheetSink>(&self, sink: &mut S) {
        for (row, col, value) in self.grid.iter() {
            sink.write_cell(row, col, value);
        }
    }
}
