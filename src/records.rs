//! BIFF12 record scanning and primitive payload decoders.
//!
//! An XLSB part is a flat sequence of records, each a variable-width header
//! (1- or 2-byte type tag plus a 1-4 byte base-128 length) followed by a
//! payload of exactly the declared length. The scanner below walks a
//! fully-buffered part and hands out borrowed payload spans. A header or
//! payload that would run past the end of the buffer ends the sequence;
//! truncation is end-of-stream here, never an error.

use encoding_rs::UTF_16LE;

use crate::binary::read_u32_le;

/// Default ceiling on declared wide-string character counts. Larger counts
/// are taken as a mis-identified payload layout rather than a valid string.
pub const DEFAULT_MAX_STRING_LEN: usize = 10_000;

/// BIFF12 record type tags this crate dispatches on ([MS-XLSB] numbering).
pub mod tags {
    /// BrtRowHdr
    pub const ROW_HDR: u16 = 0x0000;
    /// BrtCellBlank
    pub const CELL_BLANK: u16 = 0x0001;
    /// BrtCellRk
    pub const CELL_RK: u16 = 0x0002;
    /// BrtCellError
    pub const CELL_ERROR: u16 = 0x0003;
    /// BrtCellBool
    pub const CELL_BOOL: u16 = 0x0004;
    /// BrtCellReal
    pub const CELL_REAL: u16 = 0x0005;
    /// BrtCellSt (inline string)
    pub const CELL_ST: u16 = 0x0006;
    /// BrtCellIsst (shared-string reference)
    pub const CELL_ISST: u16 = 0x0007;
    /// BrtSSTItem
    pub const SST_ITEM: u16 = 0x0013;
    /// BrtBeginSheetData
    pub const BEGIN_SHEET_DATA: u16 = 0x0091;
    /// BrtEndSheetData
    pub const END_SHEET_DATA: u16 = 0x0092;
    /// BrtBeginSst
    pub const BEGIN_SST: u16 = 0x009F;
    /// BrtEndSst
    pub const END_SST: u16 = 0x00A0;
}

/// A single record borrowed from a stream buffer.
///
/// Constructed transiently while scanning; not retained after dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Record type tag
    pub record_type: u16,
    /// Payload span, exactly the declared length
    pub data: &'a [u8],
}

/// Iterator over the records of a fully-buffered stream.
///
/// Restartable per call ([`RecordIter::new`] always begins at the start of
/// the buffer), not resumable across buffers.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        RecordIter { buf, pos: 0 }
    }

    fn read_u8(&mut self) -> Option<u8> {
        let b = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    /// Decode the record type: one byte, or two when the high bit of the
    /// first byte is set.
    fn read_type(&mut self) -> Option<u16> {
        let b = self.read_u8()?;
        if (b & 0x80) == 0x80 {
            Some(((b & 0x7F) as u16) | ((self.read_u8()? as u16) << 7))
        } else {
            Some(b as u16)
        }
    }

    /// Decode the base-128 payload length: at most 4 bytes, capping the
    /// accumulated value at 28 significant bits.
    fn read_len(&mut self) -> Option<usize> {
        let mut b = self.read_u8()?;
        let mut len = (b & 0x7F) as usize;
        for i in 1..4 {
            if (b & 0x80) == 0 {
                break;
            }
            b = self.read_u8()?;
            len |= ((b & 0x7F) as usize) << (7 * i);
        }
        Some(len)
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        let record_type = self.read_type()?;
        let len = self.read_len()?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len());
        let Some(end) = end else {
            // Declared length exceeds the remaining bytes: the record is
            // never materialized and the sequence ends.
            self.pos = self.buf.len();
            return None;
        };
        let data = &self.buf[self.pos..end];
        self.pos = end;
        Some(Record { record_type, data })
    }
}

/// Decode a length-prefixed wide string (UTF-16LE) from a payload span.
///
/// Two layouts occur: a 4-byte character count at offset 0 followed by the
/// code units, and the same behind one leading flag byte (the shared-string
/// item layout). The plain layout is tried first; a count that would read
/// past the span or exceeds `max_chars` is taken as a signal that the span
/// uses the flag-byte layout, which is then tried before giving up. Which
/// layout a given span actually uses is not recoverable from the bytes
/// alone, hence the probe order.
pub fn wide_str(buf: &[u8], max_chars: usize) -> Option<String> {
    wide_str_at(buf, 0, max_chars).or_else(|| wide_str_at(buf, 1, max_chars))
}

fn wide_str_at(buf: &[u8], offset: usize, max_chars: usize) -> Option<String> {
    let chars = read_u32_le(buf, offset)? as usize;
    if chars > max_chars {
        return None;
    }
    let start = offset.checked_add(4)?;
    let end = start.checked_add(chars.checked_mul(2)?)?;
    let utf16 = buf.get(start..end)?;
    Some(UTF_16LE.decode(utf16).0.into_owned())
}

/// Decode an RK-compressed numeric word to f64.
///
/// Bit 0 scales the decoded value by 1/100. A clear bit 1 selects the
/// packed-integer form: the upper 30 bits hold the value, sign-extended by
/// OR-ing `0xC000_0000` when bit 29 of the shifted word is set. A set bit 1
/// selects the truncated float form: the word with its low two bits cleared,
/// reinterpreted as an IEEE-754 single.
pub fn rk_to_f64(rk: u32) -> f64 {
    let scale_by_100 = (rk & 0x01) != 0;
    let mut value = if (rk & 0x02) == 0 {
        let mut shifted = rk >> 2;
        if (shifted & 0x2000_0000) != 0 {
            shifted |= 0xC000_0000;
        }
        shifted as i32 as f64
    } else {
        f32::from_bits(rk & 0xFFFF_FFFC) as f64
    };
    if scale_by_100 {
        value /= 100.0;
    }
    value
}
