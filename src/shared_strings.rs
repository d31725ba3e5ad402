//! Shared-string table reconstruction.
//!
//! The shared-strings part is one `BEGIN_SST`..`END_SST` block whose
//! `SST_ITEM` records each carry a single string. Cell records refer to
//! strings by position of first appearance, so every item appends exactly
//! one entry even when its payload fails to decode — the placeholder keeps
//! every later index stable.

use log::debug;

use crate::records::{RecordIter, tags, wide_str};

/// Ordered table of shared strings, immutable after construction.
///
/// Indices are 0-based and range-checked on lookup.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Build the table from the raw shared-strings stream.
    ///
    /// Never fails: undecodable items become empty placeholders, and a
    /// stream truncated mid-record simply ends the table early.
    pub fn parse(stream: &[u8], max_string_len: usize) -> Self {
        let mut strings = Vec::new();
        for record in RecordIter::new(stream) {
            if record.record_type == tags::SST_ITEM {
                strings.push(wide_str(record.data, max_string_len).unwrap_or_default());
            }
        }
        debug!("shared-string table: {} entries", strings.len());
        SharedStrings { strings }
    }

    /// Look up a 0-based index; `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::DEFAULT_MAX_STRING_LEN;
    use crate::testutil::{record, sst_stream};

    #[test]
    fn test_table_preserves_record_order() {
        let stream = sst_stream(&["alpha", "", "beta"]);
        let table = SharedStrings::parse(&stream, DEFAULT_MAX_STRING_LEN);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some("alpha"));
        assert_eq!(table.get(1), Some(""));
        assert_eq!(table.get(2), Some("beta"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_undecodable_item_becomes_placeholder() {
        let mut stream = record(tags::SST_ITEM, &crate::testutil::sst_item_payload("first"));
        // Flag byte followed by a count that overruns the payload.
        let mut broken = vec![0u8];
        broken.extend_from_slice(&500u32.to_le_bytes());
        stream.extend_from_slice(&record(tags::SST_ITEM, &broken));
        stream.extend_from_slice(&record(tags::SST_ITEM, &crate::testutil::sst_item_payload("third")));

        let table = SharedStrings::parse(&stream, DEFAULT_MAX_STRING_LEN);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(""));
        // Positional stability is the point of the placeholder.
        assert_eq!(table.get(2), Some("third"));
    }

    #[test]
    fn test_non_item_records_are_skipped() {
        let table = SharedStrings::parse(&sst_stream(&[]), DEFAULT_MAX_STRING_LEN);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let table = SharedStrings::parse(&[], DEFAULT_MAX_STRING_LEN);
        assert!(table.is_empty());
        assert_eq!(table.get(0), None);
    }
}
