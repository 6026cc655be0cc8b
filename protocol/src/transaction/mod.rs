//! # Transaction Module
//!
//! The immutable object model and the pipelines that move a transaction
//! from intent to a signed, submittable payload.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        - Authorization and Data (named, typed payload fields)
//! action.rs       - Action: contract call + payload + authorizations
//! builder.rs      - Transaction and its fluent TransactionBuilder
//! linking.rs      - ChainContext, link(), LinkedAction, LinkedTransaction
//! packing.rs      - the one canonical encoder, and the transaction id
//! signing.rs      - signing digest, SignedTransaction, submission
//! verification.rs - signer recovery for co-signed transactions
//! error.rs        - TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** - assemble [`Action`]s into a [`Transaction`].
//! 2. **Link** - merge a [`ChainContext`] with [`Transaction::link`].
//! 3. **Sign** - [`LinkedTransaction::sign`] returns a [`SignedTransaction`];
//!    signing that again appends a co-signature.
//! 4. **Submit** - [`SignedTransaction::send`] hands the packed payload to a
//!    [`TransactionSubmitter`](crate::network::TransactionSubmitter).
//!
//! Every step returns a new value. Nothing here has a `&mut self` method.

pub mod action;
pub mod builder;
pub mod error;
pub mod linking;
pub mod packing;
pub mod signing;
pub mod types;
pub mod verification;

pub use action::Action;
pub use builder::{Transaction, TransactionBuilder};
pub use error::TransactionError;
pub use linking::{ChainContext, ChainId, LinkedAction, LinkedTransaction, TransactionHeader};
pub use packing::{pack, transaction_id};
pub use signing::{sign_transaction, signing_digest, SignedTransaction};
pub use types::{Authorization, Data};
pub use verification::verify_transaction;
