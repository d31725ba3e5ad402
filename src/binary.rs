//! Little-endian primitive readers shared by the record decoders.
//!
//! BIFF12 stores every multi-byte value little-endian. These helpers read
//! fixed-width primitives out of record payloads without panicking: a read
//! past the end of the slice yields `None`, which callers translate into
//! their drop-the-record policy.

use zerocopy::{F64, FromBytes, LE, U32};

/// Read a little-endian u32 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    U32::<LE>::read_from_bytes(data.get(offset..end)?)
        .ok()
        .map(|v| v.get())
}

/// Read a little-endian IEEE-754 double from a byte slice at the given offset.
#[inline]
pub(crate) fn read_f64_le(data: &[u8], offset: usize) -> Option<f64> {
    let end = offset.checked_add(8)?;
    F64::<LE>::read_from_bytes(data.get(offset..end)?)
        .ok()
        .map(|v| v.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_le() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xFF];
        assert_eq!(read_u32_le(&data, 0), Some(0x1234_5678));
        assert_eq!(read_u32_le(&data, 1), Some(0xFF12_3456));
        assert_eq!(read_u32_le(&data, 2), None); // only 3 bytes left
        assert_eq!(read_u32_le(&data, usize::MAX), None); // offset overflow
    }

    #[test]
    fn test_read_f64_le() {
        let data = 2.5f64.to_le_bytes();
        assert_eq!(read_f64_le(&data, 0), Some(2.5));
        assert_eq!(read_f64_le(&data, 1), None);
    }
}
