//! Error types for the type codec library.
//!
//! Every failure here happens at construction or decode time. Encoding a
//! value that was constructed successfully never fails, so `encode` has no
//! error path at all.

use std::path::PathBuf;

use thiserror::Error;

use super::value::TypeTag;

/// Errors raised while constructing or decoding a typed value.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A chain name contains a character outside its alphabet or is too long.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// An asset symbol code or precision is out of bounds.
    #[error("invalid symbol {symbol:?}: {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    /// An asset quantity string could not be parsed.
    #[error("invalid asset {asset:?}: {reason}")]
    InvalidAsset { asset: String, reason: String },

    /// A numeric value does not fit the declared width.
    #[error("value {value} is out of range for {type_tag}")]
    OutOfRange { type_tag: TypeTag, value: String },

    /// An array element does not share the array's declared element type.
    #[error("array element {index} is {found}, expected {expected}")]
    ArrayTypeMismatch {
        index: usize,
        expected: TypeTag,
        found: TypeTag,
    },

    /// A JSON value has the wrong shape for the requested type.
    #[error("cannot read {type_tag} from JSON: {reason}")]
    InvalidJson { type_tag: TypeTag, reason: String },

    /// The type tag string does not name a built-in codec.
    #[error("unknown type tag {0:?}")]
    UnknownType(String),

    /// A type tag nests `Array<...>` deeper than the codec allows.
    #[error("type tag nests arrays {depth} deep, limit is {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// Malformed hex input.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} more bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// The value was decoded but bytes were left over.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),

    /// A varuint ran past the ten-byte limit of a 64-bit integer.
    #[error("varuint exceeds 64 bits")]
    VaruintOverflow,

    /// String bytes were not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Reading a binary blob from disk failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
