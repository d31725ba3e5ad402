//! Container access.
//!
//! The decoders never touch the archive themselves; they consume raw stream
//! bytes. [`ArchiveReader`] is the seam through which a host supplies those
//! bytes, and [`ZipPackage`] is the stock implementation over the ZIP
//! container modern Office formats use.

use std::io::{Read, Seek};

use bytes::Bytes;

use crate::error::{Error, Result};

/// Yields named binary streams out of a workbook container.
pub trait ArchiveReader {
    /// Return the bytes of the entry at `path`, or `None` when no such
    /// entry exists. Errors are reserved for unreadable containers.
    fn read_entry(&mut self, path: &str) -> Result<Option<Bytes>>;
}

/// [`ArchiveReader`] over a ZIP container.
pub struct ZipPackage<RS: Read + Seek> {
    archive: zip::ZipArchive<RS>,
}

impl<RS: Read + Seek> ZipPackage<RS> {
    /// Open the container, validating the ZIP structure up front.
    pub fn open(reader: RS) -> Result<Self> {
        Ok(ZipPackage {
            archive: zip::ZipArchive::new(reader)?,
        })
    }
}

impl<RS: Read + Seek> ArchiveReader for ZipPackage<RS> {
    fn read_entry(&mut self, path: &str) -> Result<Option<Bytes>> {
        let mut file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(Error::Zip(e)),
        };
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(Some(Bytes::from(buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::zip_package;
    use std::io::Cursor;

    #[test]
    fn test_open_rejects_non_zip_bytes() {
        let garbage = Cursor::new(b"not a zip container".to_vec());
        assert!(matches!(ZipPackage::open(garbage), Err(Error::Zip(_))));
    }

    #[test]
    fn test_read_entry() {
        let cursor = zip_package(&[("xl/sharedStrings.bin", b"\x13\x00" as &[u8])]);
        let mut package = ZipPackage::open(cursor).unwrap();
        let blob = package.read_entry("xl/sharedStrings.bin").unwrap().unwrap();
        assert_eq!(&blob[..], b"\x13\x00");
        assert!(package.read_entry("xl/missing.bin").unwrap().is_none());
    }
}
