//! Opaque binary blobs sourced from files, such as compiled contract code
//! for `eosio::setcode`.

use std::fmt;
use std::path::Path;

use super::error::CodecError;
use super::reader::ByteReader;
use super::varint::{read_varuint, write_varuint};

/// Compiled contract code, held verbatim.
///
/// Encodes exactly like a `bytes` value: varuint length, then the raw
/// contents of the file.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Wasm {
    code: Vec<u8>,
}

impl Wasm {
    pub fn new(code: Vec<u8>) -> Self {
        Self { code }
    }

    /// Loads a blob from disk without interpreting its contents.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let code = std::fs::read(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), size = code.len(), "loaded binary blob");
        Ok(Self { code })
    }

    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        Ok(Self {
            code: hex::decode(s)?,
        })
    }

    /// Lowercase hex of the raw contents (no length prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.code)
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        write_varuint(buf, self.code.len() as u64);
        buf.extend_from_slice(&self.code);
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let len = read_varuint(reader)? as usize;
        Ok(Self {
            code: reader.read_slice(len)?.to_vec(),
        })
    }
}

impl fmt::Debug for Wasm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wasm({} bytes)", self.code.len())
    }
}
