//! Builders for the synthetic BIFF12 streams used across the test modules.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;

use crate::records::tags;

/// Encode one record: variable-width type tag, base-128 length, payload.
pub(crate) fn record(tag: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    if tag < 0x80 {
        out.push(tag as u8);
    } else {
        out.push(((tag & 0x7F) as u8) | 0x80);
        out.push((tag >> 7) as u8);
    }
    let mut len = payload.len();
    loop {
        let b = (len & 0x7F) as u8;
        len >>= 7;
        if len == 0 {
            out.push(b);
            break;
        }
        out.push(b | 0x80);
    }
    out.extend_from_slice(payload);
    out
}

/// Inline wide-string payload: 4-byte character count plus UTF-16LE units.
pub(crate) fn wide_payload(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut out = (units.len() as u32).to_le_bytes().to_vec();
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Shared-string item payload: one flag byte, then the wide string.
pub(crate) fn sst_item_payload(s: &str) -> Vec<u8> {
    let mut out = vec![0u8];
    out.extend_from_slice(&wide_payload(s));
    out
}

/// Cell record payload: 4-byte column index, a 4-byte style field, then the
/// value body at offset 8.
pub(crate) fn cell_payload(col: u32, body: &[u8]) -> Vec<u8> {
    let mut out = col.to_le_bytes().to_vec();
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(body);
    out
}

/// A complete shared-strings stream with the given entries.
pub(crate) fn sst_stream(entries: &[&str]) -> Vec<u8> {
    let mut stream = record(tags::BEGIN_SST, &8u32.to_le_bytes().repeat(2));
    for entry in entries {
        stream.extend_from_slice(&record(tags::SST_ITEM, &sst_item_payload(entry)));
    }
    stream.extend_from_slice(&record(tags::END_SST, &[]));
    stream
}

/// An in-memory ZIP container with the given entries, stored uncompressed.
pub(crate) fn zip_package(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap()
}
