//! # Hashing Utilities
//!
//! The three digests the chain's formats are built from:
//!
//! - **SHA-256** - transaction ids and the signing digest.
//! - **double SHA-256** - the checksum of legacy WIF private keys.
//! - **RIPEMD-160** - the checksum of `PUB_K1_`, `PVT_K1_` and `SIG_K1_`
//!   text forms (salted with the curve tag) and of legacy `EOS…` public keys.
//!
//! All functions return fixed-size arrays; callers that need a `Vec` can
//! call `.to_vec()` themselves.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use eosio_tx::crypto::sha256;
///
/// let hash = sha256(b"abc");
/// assert_eq!(hash[0], 0xba);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over several slices without concatenating them first.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `SHA-256(SHA-256(data))`, as used by Bitcoin-style WIF checksums.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// RIPEMD-160 over several slices; used for checksums salted with a suffix.
pub fn ripemd160_multi(parts: &[&[u8]]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_multi_matches_concatenation() {
        assert_eq!(sha256_multi(&[b"ab", b"", b"c"]), sha256(b"abc"));
    }

    #[test]
    fn double_sha256_is_sha256_twice() {
        let once = sha256(b"eosio");
        assert_eq!(double_sha256(b"eosio"), sha256(&once));
        assert_ne!(double_sha256(b"eosio"), once);
    }

    #[test]
    fn ripemd160_known_vectors() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(
            hex::encode(ripemd160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn ripemd160_multi_matches_concatenation() {
        assert_eq!(ripemd160_multi(&[b"a", b"bc"]), ripemd160(b"abc"));
    }
}
