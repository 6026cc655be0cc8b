//! Errors raised by the transaction object model and its pipelines.

use thiserror::Error;

use crate::codec::CodecError;
use crate::crypto::{KeyError, PublicKey, SignatureError};
use crate::network::NetworkError;

/// Errors from constructing, linking, signing or submitting transactions.
///
/// Construction errors are raised synchronously by the constructor that
/// detected them; no partially-valid object is ever returned.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A field value failed codec validation (bad name, range, JSON shape).
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// An action was constructed without any authorization.
    #[error("action {account}::{name} requires at least one authorization")]
    NoAuthorization { account: String, name: String },

    /// A transaction was constructed without any action.
    #[error("transaction requires at least one action")]
    NoActions,

    /// A `Data` map did not have exactly the keys `name`, `type`, `value`.
    #[error("data map must have exactly the keys name, type and value; found {found:?}")]
    DataMapShape { found: Vec<String> },

    /// A chain id was not 32 bytes of hex.
    #[error("invalid chain id {0:?}: expected 64 hex characters")]
    InvalidChainId(String),

    /// A block id was not 32 bytes of hex.
    #[error("invalid block id {0:?}: expected 64 hex characters")]
    InvalidBlockId(String),

    /// The computed expiration does not fit the 32-bit seconds field.
    #[error("expiration {0} is outside the 32-bit epoch range")]
    ExpirationOutOfRange(i64),

    /// A required signer has no signature on the transaction.
    #[error("transaction is not signed by {0}")]
    MissingSignature(PublicKey),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Convenience alias used throughout the transaction module.
pub type Result<T> = std::result::Result<T, TransactionError>;
