//! Linking: merging chain context into actions and transactions.
//!
//! Linking is a pure function of an object and a [`ChainContext`]. It never
//! talks to the network itself; [`Transaction::link_with`] is a thin async
//! wrapper that asks a [`ChainContextSource`] for the context first.
//!
//! ```text
//! Transaction ──link(ctx)──▶ LinkedTransaction ──sign(key)──▶ SignedTransaction
//! Action      ──link(ctx)──▶ LinkedAction ──into_transaction──▶ LinkedTransaction
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::action::Action;
use super::builder::Transaction;
use super::error::{Result, TransactionError};
use crate::config::TransactionOptions;
use crate::network::ChainContextSource;

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// The 32-byte identifier of a chain, written as 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId([u8; 32]);

impl ChainId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for ChainId {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|_| TransactionError::InvalidChainId(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TransactionError::InvalidChainId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({})", self)
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ChainContext
// ---------------------------------------------------------------------------

/// Everything linking needs to know about the target chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContext {
    pub chain_id: ChainId,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub head_block_time: DateTime<Utc>,
}

impl ChainContext {
    /// Derives the TaPoS reference from a block id.
    ///
    /// The block number is the big-endian `u32` in bytes `0..4`; its low
    /// 16 bits are the reference number. The prefix is the little-endian
    /// `u32` in bytes `8..12`.
    pub fn from_block_id(
        chain_id: ChainId,
        block_id: &str,
        head_block_time: DateTime<Utc>,
    ) -> Result<Self> {
        let invalid = || TransactionError::InvalidBlockId(block_id.to_string());
        let bytes = hex::decode(block_id.trim()).map_err(|_| invalid())?;
        if bytes.len() != 32 {
            return Err(invalid());
        }
        let block_num = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let ref_block_prefix = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        Ok(Self {
            chain_id,
            ref_block_num: (block_num & 0xffff) as u16,
            ref_block_prefix,
            head_block_time,
        })
    }

    /// Header for a transaction linked against this context.
    fn header(&self, options: &TransactionOptions) -> Result<TransactionHeader> {
        let expiration = self.head_block_time.timestamp() + i64::from(options.expiration_delay_sec);
        let expiration =
            u32::try_from(expiration).map_err(|_| TransactionError::ExpirationOutOfRange(expiration))?;
        Ok(TransactionHeader {
            expiration,
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            max_net_usage_words: options.max_net_usage_words,
            max_cpu_usage_ms: options.max_cpu_usage_ms,
            delay_sec: options.delay_sec,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionHeader
// ---------------------------------------------------------------------------

/// The fixed-order header fields of a packed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Seconds since the Unix epoch.
    pub expiration: u32,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl TransactionHeader {
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(i64::from(self.expiration), 0).single()
    }
}

// ---------------------------------------------------------------------------
// LinkedTransaction
// ---------------------------------------------------------------------------

/// A transaction with its chain context resolved; ready to pack and sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedTransaction {
    chain_id: ChainId,
    header: TransactionHeader,
    actions: Vec<Action>,
}

impl LinkedTransaction {
    /// Assembles a linked transaction from explicit context values.
    ///
    /// Used for deterministic fixtures and offline reconstruction; normal
    /// code goes through [`Transaction::link`].
    pub fn new(chain_id: ChainId, header: TransactionHeader, actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(TransactionError::NoActions);
        }
        Ok(Self {
            chain_id,
            header,
            actions,
        })
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn header(&self) -> &TransactionHeader {
        &self.header
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

// ---------------------------------------------------------------------------
// LinkedAction
// ---------------------------------------------------------------------------

/// An action bound to a chain context, not yet wrapped in a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAction {
    action: Action,
    context: ChainContext,
}

impl LinkedAction {
    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn context(&self) -> &ChainContext {
        &self.context
    }

    /// Wraps the action in a single-action transaction sharing its context.
    pub fn into_transaction(self, options: TransactionOptions) -> Result<LinkedTransaction> {
        Transaction::with_options(vec![self.action], options)?.link(&self.context)
    }
}

// ---------------------------------------------------------------------------
// link
// ---------------------------------------------------------------------------

impl Action {
    pub fn link(&self, context: &ChainContext) -> LinkedAction {
        LinkedAction {
            action: self.clone(),
            context: *context,
        }
    }
}

impl Transaction {
    /// Merges `context` into this transaction.
    ///
    /// `expiration = head_block_time + expiration_delay_sec`, in whole
    /// seconds. Fails only if that lands outside the `u32` epoch range.
    pub fn link(&self, context: &ChainContext) -> Result<LinkedTransaction> {
        let header = context.header(self.options())?;
        debug!(
            chain_id = %context.chain_id,
            ref_block_num = header.ref_block_num,
            expiration = header.expiration,
            actions = self.actions().len(),
            "linked transaction"
        );
        Ok(LinkedTransaction {
            chain_id: context.chain_id,
            header,
            actions: self.actions().to_vec(),
        })
    }

    /// Fetches the context from `source`, then links.
    pub async fn link_with<S>(&self, source: &S) -> Result<LinkedTransaction>
    where
        S: ChainContextSource + ?Sized,
    {
        let context = source.chain_context().await?;
        self.link(&context)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
