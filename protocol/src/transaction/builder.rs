//! Transaction construction via the builder pattern.
//!
//! A [`Transaction`] is an ordered, non-empty list of actions plus the
//! header values that are fixed before linking (delay, resource limits and
//! the expiration window). The [`TransactionBuilder`] overrides those
//! defaults fluently; [`Transaction::new`] takes them as-is.
//!
//! Nothing here touches the network or key material. Linking happens in
//! [`super::linking`], signing in [`super::signing`].

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::error::{Result, TransactionError};
use crate::config::TransactionOptions;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unlinked transaction.
///
/// # Example
///
/// ```
/// use eosio_tx::transaction::{Action, Authorization, Data, Transaction};
///
/// let action = Action::parse(
///     "user2",
///     "sendmsg",
///     vec![Data::new("message", "hello")],
///     vec![Authorization::new("user2", "active").unwrap()],
/// )
/// .unwrap();
///
/// let tx = Transaction::builder()
///     .action(action)
///     .expiration_delay_sec(30)
///     .build()
///     .unwrap();
/// assert_eq!(tx.options().expiration_delay_sec, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransaction")]
pub struct Transaction {
    actions: Vec<Action>,
    options: TransactionOptions,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTransaction {
    actions: Vec<Action>,
    #[serde(default)]
    options: TransactionOptions,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(raw: RawTransaction) -> Result<Self> {
        Self::with_options(raw.actions, raw.options)
    }
}

impl Transaction {
    /// A transaction with the protocol-default header values.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        Self::with_options(actions, TransactionOptions::default())
    }

    pub fn with_options(actions: Vec<Action>, options: TransactionOptions) -> Result<Self> {
        if actions.is_empty() {
            return Err(TransactionError::NoActions);
        }
        Ok(Self { actions, options })
    }

    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn options(&self) -> &TransactionOptions {
        &self.options
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// Unset header values keep the protocol defaults from
/// [`TransactionOptions::default`]. `build()` fails if no action was added.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    actions: Vec<Action>,
    options: TransactionOptions,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends several actions, preserving order.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Replaces every header value at once.
    pub fn options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn delay_sec(mut self, delay_sec: u32) -> Self {
        self.options.delay_sec = delay_sec;
        self
    }

    pub fn max_cpu_usage_ms(mut self, max_cpu_usage_ms: u8) -> Self {
        self.options.max_cpu_usage_ms = max_cpu_usage_ms;
        self
    }

    pub fn max_net_usage_words(mut self, max_net_usage_words: u32) -> Self {
        self.options.max_net_usage_words = max_net_usage_words;
        self
    }

    /// Seconds added to the head block time to form the expiration.
    pub fn expiration_delay_sec(mut self, expiration_delay_sec: u32) -> Self {
        self.options.expiration_delay_sec = expiration_delay_sec;
        self
    }

    pub fn build(self) -> Result<Transaction> {
        Transaction::with_options(self.actions, self.options)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
