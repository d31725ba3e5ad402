//! Error types for workbook decoding.
//!
//! Record-level anomalies (truncation, implausible lengths, out-of-range
//! indices) never surface here — the decoders absorb them by dropping the
//! affected record. These variants cover the two fatal conditions: a
//! container that cannot be opened, and a container missing a required
//! stream.

use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can fail a workbook decode.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the container
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a readable ZIP archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A required stream is missing from the container
    #[error("stream '{0}' not found in container")]
    StreamNotFound(String),
}
