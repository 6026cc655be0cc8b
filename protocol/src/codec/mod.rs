//! # Type Codec Library
//!
//! Typed value wrappers and their canonical binary encodings. This is the
//! leaf of the crate: nothing in here knows about actions or transactions,
//! and everything above it (packing, signing) ultimately bottoms out in
//! `TypedValue::encode_into`.
//!
//! The encodings must match the chain's ABI serializer byte for byte:
//!
//! - **varint** - LEB128 length prefixes and header fields.
//! - **name** - the 64-bit base32 account/action/permission names.
//! - **asset** - fixed-point quantities with a symbol.
//! - **value** - the closed [`TypedValue`] union and its [`TypeTag`].
//! - **blob** - opaque binary blobs loaded from files (contract code).
//!
//! Construction validates; encoding cannot fail. If you find yourself adding
//! an error path to an `encode` function, a constructor is missing a check.

pub mod asset;
pub mod blob;
pub mod error;
pub mod name;
pub mod reader;
pub mod value;
pub mod varint;

pub use asset::{Asset, Symbol};
pub use blob::Wasm;
pub use error::CodecError;
pub use name::{AccountName, ActionName, Name, PermissionName};
pub use reader::ByteReader;
pub use value::{Array, TypeTag, TypedValue};
pub use varint::{read_varuint, varuint_bytes, write_varuint};
