//! # Key Management
//!
//! secp256k1 ("K1") private and public keys in the chain's text formats.
//!
//! Private keys arrive in one of two encodings:
//!
//! | Form      | Payload                               | Checksum                           |
//! |-----------|---------------------------------------|------------------------------------|
//! | WIF       | `0x80` ‖ scalar (32)                  | `double_sha256(payload)[..4]`      |
//! | `PVT_K1_` | scalar (32)                           | `ripemd160(payload ‖ "K1")[..4]`   |
//!
//! Public keys are compressed SEC1 points (33 bytes), written either as
//! `PUB_K1_…` (salted ripemd160 checksum) or as legacy `EOS…` (unsalted).
//!
//! ## Security considerations
//!
//! - Generation uses `OsRng`.
//! - `Debug` on [`PrivateKey`] never prints the scalar, and nothing in this
//!   module logs key bytes.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::hash::{double_sha256, ripemd160_multi};
use crate::config::{
    CHECKSUM_LENGTH, K1_KEY_TYPE, LEGACY_PUBLIC_KEY_PREFIX, PRIVATE_KEY_K1_PREFIX,
    PUBLIC_KEY_K1_PREFIX, WIF_VERSION_BYTE,
};

/// Length of a secp256k1 secret scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Errors that can occur while decoding or deriving keys.
///
/// None of these carry key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid key length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("key checksum mismatch")]
    ChecksumMismatch,

    #[error("unsupported key version byte 0x{0:02x}")]
    UnsupportedVersion(u8),

    #[error("private key scalar is zero or not below the curve order")]
    InvalidScalar,

    #[error("public key is not a valid compressed secp256k1 point")]
    InvalidPublicKey,
}

// ---------------------------------------------------------------------------
// Checked base-58
// ---------------------------------------------------------------------------

/// Failure while decoding a checksummed base-58 payload.
#[derive(Debug)]
pub(crate) enum CheckedDecodeError {
    Base58(bs58::decode::Error),
    Length { expected: usize, found: usize },
    Checksum,
}

impl From<CheckedDecodeError> for KeyError {
    fn from(err: CheckedDecodeError) -> Self {
        match err {
            CheckedDecodeError::Base58(e) => Self::InvalidEncoding(e.to_string()),
            CheckedDecodeError::Length { expected, found } => {
                Self::InvalidLength { expected, found }
            }
            CheckedDecodeError::Checksum => Self::ChecksumMismatch,
        }
    }
}

/// `ripemd160(payload ‖ suffix)[..4]`. An empty suffix gives the legacy form.
pub(crate) fn ripemd160_checksum(payload: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = ripemd160_multi(&[payload, suffix]);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// Base-58 of `payload ‖ ripemd160_checksum(payload, suffix)`.
pub(crate) fn encode_ripemd160_check(payload: &[u8], suffix: &[u8]) -> String {
    let mut buf = Vec::with_capacity(payload.len() + CHECKSUM_LENGTH);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&ripemd160_checksum(payload, suffix));
    bs58::encode(buf).into_string()
}

/// Inverse of [`encode_ripemd160_check`]; returns the payload.
pub(crate) fn decode_ripemd160_check(
    encoded: &str,
    suffix: &[u8],
    payload_len: usize,
) -> Result<Vec<u8>, CheckedDecodeError> {
    let mut raw = bs58::decode(encoded)
        .into_vec()
        .map_err(CheckedDecodeError::Base58)?;
    if raw.len() != payload_len + CHECKSUM_LENGTH {
        return Err(CheckedDecodeError::Length {
            expected: payload_len + CHECKSUM_LENGTH,
            found: raw.len(),
        });
    }
    let checksum = raw.split_off(payload_len);
    if checksum != ripemd160_checksum(&raw, suffix) {
        return Err(CheckedDecodeError::Checksum);
    }
    Ok(raw)
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A K1 signing key.
///
/// Intentionally not `Serialize`: exporting a secret should be an explicit
/// call to [`to_wif`](Self::to_wif) or [`to_k1_string`](Self::to_k1_string).
///
/// # Examples
///
/// ```
/// use eosio_tx::crypto::PrivateKey;
///
/// let key: PrivateKey = "5K5UHY2LjHw2QQFJKCd2PdF7hxPJnknMfQLhxbEguJJttr1DFdp".parse().unwrap();
/// assert_eq!(
///     key.public_key().to_string(),
///     "PUB_K1_5sRtLNDzsd9arp7J7qYSRRTcaLnRQFVkYtRuHn8tPeNSCgxxVY"
/// );
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh key from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Build a key from a raw 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidLength {
                expected: PRIVATE_KEY_LENGTH,
                found: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self { signing_key })
    }

    /// Parse a legacy WIF string.
    pub fn from_wif(s: &str) -> Result<Self, KeyError> {
        let raw = bs58::decode(s)
            .into_vec()
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
        let expected = 1 + PRIVATE_KEY_LENGTH + CHECKSUM_LENGTH;
        if raw.len() != expected {
            return Err(KeyError::InvalidLength {
                expected,
                found: raw.len(),
            });
        }
        let (payload, checksum) = raw.split_at(1 + PRIVATE_KEY_LENGTH);
        if checksum != &double_sha256(payload)[..CHECKSUM_LENGTH] {
            return Err(KeyError::ChecksumMismatch);
        }
        if payload[0] != WIF_VERSION_BYTE {
            return Err(KeyError::UnsupportedVersion(payload[0]));
        }
        Self::from_bytes(&payload[1..])
    }

    /// Parse a `PVT_K1_` string.
    pub fn from_k1_string(s: &str) -> Result<Self, KeyError> {
        let body = s.strip_prefix(PRIVATE_KEY_K1_PREFIX).ok_or_else(|| {
            KeyError::InvalidEncoding(format!("missing {} prefix", PRIVATE_KEY_K1_PREFIX))
        })?;
        let scalar = decode_ripemd160_check(body, K1_KEY_TYPE.as_bytes(), PRIVATE_KEY_LENGTH)?;
        Self::from_bytes(&scalar)
    }

    pub fn to_wif(&self) -> String {
        let mut buf = Vec::with_capacity(1 + PRIVATE_KEY_LENGTH + CHECKSUM_LENGTH);
        buf.push(WIF_VERSION_BYTE);
        buf.extend_from_slice(&self.to_bytes());
        let checksum = double_sha256(&buf);
        buf.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
        bs58::encode(buf).into_string()
    }

    pub fn to_k1_string(&self) -> String {
        format!(
            "{}{}",
            PRIVATE_KEY_K1_PREFIX,
            encode_ripemd160_check(&self.to_bytes(), K1_KEY_TYPE.as_bytes())
        )
    }

    /// The raw scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.signing_key.to_bytes().into()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    /// Accepts both `PVT_K1_…` and legacy WIF.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with(PRIVATE_KEY_K1_PREFIX) {
            Self::from_k1_string(s)
        } else {
            Self::from_wif(s)
        }
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wif())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_string())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A compressed K1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// Validate and wrap a 33-byte compressed SEC1 point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidLength {
                expected: PUBLIC_KEY_LENGTH,
                found: bytes.len(),
            });
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&vk))
    }

    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        let point = vk.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// `EOS…` form with the unsalted checksum.
    pub fn to_legacy_string(&self) -> String {
        format!(
            "{}{}",
            LEGACY_PUBLIC_KEY_PREFIX,
            encode_ripemd160_check(&self.bytes, b"")
        )
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            PUBLIC_KEY_K1_PREFIX,
            encode_ripemd160_check(&self.bytes, K1_KEY_TYPE.as_bytes())
        )
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = if let Some(body) = s.strip_prefix(PUBLIC_KEY_K1_PREFIX) {
            decode_ripemd160_check(body, K1_KEY_TYPE.as_bytes(), PUBLIC_KEY_LENGTH)?
        } else if let Some(body) = s.strip_prefix(LEGACY_PUBLIC_KEY_PREFIX) {
            decode_ripemd160_check(body, b"", PUBLIC_KEY_LENGTH)?
        } else {
            return Err(KeyError::InvalidEncoding(format!(
                "expected {} or {} prefix",
                PUBLIC_KEY_K1_PREFIX, LEGACY_PUBLIC_KEY_PREFIX
            )));
        };
        Self::from_bytes(&bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
