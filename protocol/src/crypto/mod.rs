//! # Cryptographic Primitives
//!
//! Hashes, K1 keys and recoverable signatures in the exact formats the
//! chain expects. Everything here is a thin, typed wrapper around audited
//! implementations (`k256`, `sha2`, `ripemd`); nothing is hand-rolled
//! except the text encodings, which are the chain's, not ours.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{double_sha256, ripemd160, sha256, sha256_multi};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use signatures::{sign_digest, Signature, SignatureError};
