//! Variable-length unsigned integers ("varuint").
//!
//! Seven payload bits per byte, least-significant group first, with the
//! high bit set on every byte except the last. This is the length prefix
//! for strings, byte blobs and arrays, and several header fields of the
//! packed transaction use it directly.

use super::error::CodecError;
use super::reader::ByteReader;

/// A 64-bit value never needs more than ten 7-bit groups.
const MAX_VARUINT_BYTES: usize = 10;

/// Appends the varuint encoding of `value` to `buf`.
pub fn write_varuint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Returns the varuint encoding of `value` as a fresh buffer.
pub fn varuint_bytes(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_VARUINT_BYTES);
    write_varuint(&mut buf, value);
    buf
}

/// Reads one varuint from the cursor.
pub fn read_varuint(reader: &mut ByteReader<'_>) -> Result<u64, CodecError> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARUINT_BYTES {
        let byte = reader.read_u8()?;
        let group = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;
        if shift == 63 && group > 1 {
            return Err(CodecError::VaruintOverflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(CodecError::VaruintOverflow)
}
