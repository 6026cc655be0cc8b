//! # Protocol Configuration & Constants
//!
//! Every magic number the engine depends on lives here: text-format
//! prefixes, version bytes, and the chain's default transaction header
//! values. The constants are fixed by the deployed chain protocol; changing
//! one produces transactions the chain will reject.
//!
//! [`TransactionOptions`] is the only runtime-configurable piece. It carries
//! the header defaults a caller may override per transaction, and can be
//! loaded from JSON.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transaction Header Defaults
// ---------------------------------------------------------------------------

/// Seconds between the chain's head block time and the transaction's
/// expiration when the caller does not override it.
pub const DEFAULT_EXPIRATION_DELAY_SEC: u32 = 600;

/// Deferred execution delay. Zero means "execute immediately."
pub const DEFAULT_DELAY_SEC: u32 = 0;

/// Zero lets the chain apply its own per-transaction CPU limit.
pub const DEFAULT_MAX_CPU_USAGE_MS: u8 = 0;

/// Zero lets the chain apply its own per-transaction NET limit.
pub const DEFAULT_MAX_NET_USAGE_WORDS: u32 = 0;

/// Deepest `Array<...>` nesting accepted in a type tag.
pub const MAX_ARRAY_NESTING: usize = 8;

// ---------------------------------------------------------------------------
// Key & Signature Text Formats
// ---------------------------------------------------------------------------

/// Curve tag appended to the checksum input of `*_K1_` text forms.
pub const K1_KEY_TYPE: &str = "K1";

/// Prefix of K1 private keys in the typed text format.
pub const PRIVATE_KEY_K1_PREFIX: &str = "PVT_K1_";

/// Prefix of K1 public keys in the typed text format.
pub const PUBLIC_KEY_K1_PREFIX: &str = "PUB_K1_";

/// Prefix of legacy public keys (unsalted checksum).
pub const LEGACY_PUBLIC_KEY_PREFIX: &str = "EOS";

/// Prefix of K1 signatures.
pub const SIGNATURE_K1_PREFIX: &str = "SIG_K1_";

/// Version byte of legacy WIF private keys.
pub const WIF_VERSION_BYTE: u8 = 0x80;

/// Trailing checksum bytes on every base-58 key or signature payload.
pub const CHECKSUM_LENGTH: usize = 4;

/// Added to the recovery id to form the first byte of a compact signature.
pub const SIGNATURE_RECOVERY_OFFSET: u8 = 27;

/// Upper bound on recovery-id candidates tried while signing. secp256k1
/// has exactly four.
pub const MAX_RECOVERY_ID_CANDIDATES: u8 = 4;

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

/// Digest of the context-free data segment when it is empty.
pub const EMPTY_CONTEXT_FREE_DATA_DIGEST: [u8; 32] = [0u8; 32];

/// Compression marker sent with every submitted transaction.
pub const PACKED_TRANSACTION_COMPRESSION: &str = "none";

// ---------------------------------------------------------------------------
// TransactionOptions
// ---------------------------------------------------------------------------

/// Overridable header values applied when a transaction is linked.
///
/// Missing keys in a JSON config fall back to the protocol defaults:
///
/// ```
/// use eosio_tx::config::TransactionOptions;
///
/// let opts: TransactionOptions = serde_json::from_str(r#"{"delay_sec": 5}"#).unwrap();
/// assert_eq!(opts.delay_sec, 5);
/// assert_eq!(opts.expiration_delay_sec, 600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionOptions {
    pub delay_sec: u32,
    pub max_cpu_usage_ms: u8,
    pub max_net_usage_words: u32,
    pub expiration_delay_sec: u32,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            delay_sec: DEFAULT_DELAY_SEC,
            max_cpu_usage_ms: DEFAULT_MAX_CPU_USAGE_MS,
            max_net_usage_words: DEFAULT_MAX_NET_USAGE_WORDS,
            expiration_delay_sec: DEFAULT_EXPIRATION_DELAY_SEC,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
