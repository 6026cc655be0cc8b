//! # Digital Signatures
//!
//! Deterministic, recoverable K1 signatures in the chain's compact form.
//!
//! A signature is 65 bytes: `recovery_id + 27`, then `r` and `s` as 32-byte
//! big-endian integers. Its text form is `SIG_K1_` followed by base-58 of
//! those bytes and a ripemd160 checksum salted with `K1`.
//!
//! ## Determinism and canonical form
//!
//! Nonces come from RFC 6979 (HMAC-SHA-256 over the key and the digest), so
//! the same key and digest always yield the same signature. The chain only
//! accepts signatures with `s` in the lower half of the curve order; the
//! signature is normalized and then the recovery id is chosen by trying the
//! (at most four) candidates until one recovers the signer's own key.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use k256::elliptic_curve::scalar::IsHigh;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::keys::{
    decode_ripemd160_check, encode_ripemd160_check, CheckedDecodeError, PrivateKey, PublicKey,
};
use crate::config::{
    K1_KEY_TYPE, MAX_RECOVERY_ID_CANDIDATES, SIGNATURE_K1_PREFIX, SIGNATURE_RECOVERY_OFFSET,
};

/// Length of a compact recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Errors during signature creation, parsing or recovery.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid signature encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid signature length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("signature checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid recovery byte 0x{0:02x}")]
    InvalidRecoveryByte(u8),

    #[error("ECDSA signing failed")]
    SigningFailed,

    #[error("no recovery id candidate reproduces the signing key")]
    NoCanonicalRecoveryId,

    #[error("public key recovery failed")]
    RecoveryFailed,
}

impl From<CheckedDecodeError> for SignatureError {
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

/// A compact, recoverable K1 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

/// Sign a 32-byte digest.
///
/// The digest is signed as-is (no further hashing). Fails only if the
/// bounded recovery-id search comes up empty, which indicates a broken
/// curve implementation rather than bad input.
pub fn sign_digest(key: &PrivateKey, digest: &[u8; 32]) -> Result<Signature, SignatureError> {
    let signing_key = key.signing_key();
    let (signature, _) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| SignatureError::SigningFailed)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    let own_key = signing_key.verifying_key();

    for candidate in 0..MAX_RECOVERY_ID_CANDIDATES {
        let Some(recovery_id) = RecoveryId::from_byte(candidate) else {
            continue;
        };
        match VerifyingKey::recover_from_prehash(digest, &signature, recovery_id) {
            Ok(recovered) if &recovered == own_key => {
                let mut bytes = [0u8; SIGNATURE_LENGTH];
                bytes[0] = SIGNATURE_RECOVERY_OFFSET + candidate;
                bytes[1..].copy_from_slice(&signature.to_bytes());
                return Ok(Signature { bytes });
            }
            _ => continue,
        }
    }
    Err(SignatureError::NoCanonicalRecoveryId)
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| SignatureError::InvalidLength {
                expected: SIGNATURE_LENGTH,
                found: bytes.len(),
            })?;
        let sig = Self { bytes };
        sig.recovery_id()?;
        Ok(sig)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// The recovery id encoded in the first byte. Values 31..=34 (the
    /// compressed-key flag some tools add) are accepted as well.
    pub fn recovery_id(&self) -> Result<RecoveryId, SignatureError> {
        let raw = self.bytes[0];
        raw.checked_sub(SIGNATURE_RECOVERY_OFFSET)
            .filter(|v| *v < 2 * MAX_RECOVERY_ID_CANDIDATES)
            .and_then(|v| RecoveryId::from_byte(v % MAX_RECOVERY_ID_CANDIDATES))
            .ok_or(SignatureError::InvalidRecoveryByte(raw))
    }

    fn ecdsa(&self) -> Result<EcdsaSignature, SignatureError> {
        EcdsaSignature::from_slice(&self.bytes[1..])
            .map_err(|e| SignatureError::InvalidEncoding(e.to_string()))
    }

    /// `true` when `s` is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.ecdsa()
            .map(|sig| !bool::from(sig.s().is_high()))
            .unwrap_or(false)
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, SignatureError> {
        let vk = VerifyingKey::recover_from_prehash(digest, &self.ecdsa()?, self.recovery_id()?)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(PublicKey::from_verifying_key(&vk))
    }

    pub fn verify(&self, digest: &[u8; 32], public_key: &PublicKey) -> bool {
        self.recover(digest).map_or(false, |k| &k == public_key)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            SIGNATURE_K1_PREFIX,
            encode_ripemd160_check(&self.bytes, K1_KEY_TYPE.as_bytes())
        )
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim().strip_prefix(SIGNATURE_K1_PREFIX).ok_or_else(|| {
            SignatureError::InvalidEncoding(format!("missing {} prefix", SIGNATURE_K1_PREFIX))
        })?;
        let bytes = decode_ripemd160_check(body, K1_KEY_TYPE.as_bytes(), SIGNATURE_LENGTH)?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
