//! # Network Collaborators
//!
//! The engine never opens a socket. Everything that needs a live chain is
//! expressed as a trait the caller implements over whatever transport they
//! use:
//!
//! ```text
//! ChainContextSource   - get_info: chain id, TaPoS reference, head time
//! TransactionSubmitter - push_transaction: packed payload in, ChainResponse out
//! AbiOracle            - abi_json_to_bin: the chain's own encoder, for cross-checks
//! ```
//!
//! Wire shapes for those calls live in [`rpc`]. [`StaticContext`] is a
//! ready-made `ChainContextSource` for offline signing.
//!
//! ## Design Decisions
//!
//! - Traits use `async-trait` so implementations can be boxed and shared
//!   across tasks (`Send + Sync`).
//! - A chain rejection is data ([`rpc::ChainResponse::Rejected`]); only
//!   failures to get any answer at all are [`NetworkError`]s.
//! - No retries here. Retry policy belongs to the transport.

pub mod rpc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{AccountName, ActionName};
use crate::transaction::{Action, ChainContext};
use rpc::{ChainResponse, PackedTransaction};

pub use rpc::{ChainError, ChainInfo, Receipt};

/// Failure to obtain an answer from a collaborator.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The transport failed (connection refused, timeout, HTTP error).
    #[error("transport error: {0}")]
    Transport(String),

    /// An answer arrived but could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Supplies the chain context used for linking.
#[async_trait]
pub trait ChainContextSource: Send + Sync {
    async fn chain_context(&self) -> Result<ChainContext, NetworkError>;
}

/// Submits a packed, signed transaction.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(&self, tx: &PackedTransaction) -> Result<ChainResponse, NetworkError>;
}

/// The chain's reference encoder for action arguments.
///
/// Only used to validate local encodings; signing and submission never
/// depend on it.
#[async_trait]
pub trait AbiOracle: Send + Sync {
    async fn abi_json_to_bin(
        &self,
        account: AccountName,
        action: ActionName,
        args: &Value,
    ) -> Result<Vec<u8>, NetworkError>;
}

// ---------------------------------------------------------------------------
// StaticContext
// ---------------------------------------------------------------------------

/// A [`ChainContextSource`] that always returns the same context.
#[derive(Debug, Clone, Copy)]
pub struct StaticContext {
    context: ChainContext,
}

impl StaticContext {
    pub fn new(context: ChainContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ChainContext {
        &self.context
    }
}

#[async_trait]
impl ChainContextSource for StaticContext {
    async fn chain_context(&self) -> Result<ChainContext, NetworkError> {
        Ok(self.context)
    }
}

// ---------------------------------------------------------------------------
// Oracle cross-check
// ---------------------------------------------------------------------------

/// The `{field: value}` argument object an ABI encoder expects for `action`.
pub fn action_args(action: &Action) -> Value {
    let args: Map<String, Value> = action
        .data()
        .iter()
        .map(|d| (d.name().to_string(), d.value().to_json()))
        .collect();
    Value::Object(args)
}

/// Compares the local encoding of `action`'s payload with the oracle's.
///
/// Returns `Ok(true)` when they are byte-identical.
pub async fn check_against_oracle<O>(oracle: &O, action: &Action) -> Result<bool, NetworkError>
where
    O: AbiOracle + ?Sized,
{
    let expected = oracle
        .abi_json_to_bin(action.account(), action.name(), &action_args(action))
        .await?;
    let local = action.data_bytes();
    if local == expected {
        debug!(account = %action.account(), action = %action.name(), "local encoding matches oracle");
        Ok(true)
    } else {
        warn!(
            account = %action.account(),
            action = %action.name(),
            local = %hex::encode(&local),
            oracle = %hex::encode(&expected),
            "local encoding differs from oracle"
        );
        Ok(false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
