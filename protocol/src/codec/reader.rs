//! A bounds-checked cursor over encoded bytes.

use super::error::CodecError;

/// Sequential reader used by every `decode` path in the codec library.
///
/// All reads are bounds-checked and report how many bytes were missing,
/// so a truncated payload produces a precise error instead of a panic.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consumes `len` bytes and returns them as a slice.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < len {
            return Err(CodecError::UnexpectedEof {
                needed: len - self.remaining(),
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Consumes exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Fails with [`CodecError::TrailingBytes`] if anything is left unread.
    pub fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_order() {
        let mut r = ByteReader::new(&[1, 2, 3, 4]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_array::<2>().unwrap(), [2, 3]);
        assert_eq!(r.position(), 3);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn short_read_reports_missing_bytes() {
        let mut r = ByteReader::new(&[1, 2]);
        match r.read_slice(5) {
            Err(CodecError::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn finish_rejects_leftovers() {
        let mut r = ByteReader::new(&[1, 2]);
        r.read_u8().unwrap();
        assert!(matches!(r.finish(), Err(CodecError::TrailingBytes(1))));
    }
}
