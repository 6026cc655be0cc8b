//! Canonical packing of a linked transaction.
//!
//! [`pack`] is the single encoder for a transaction. The transaction id,
//! the signing digest and the submission payload are all derived from its
//! output; there is no second code path that could drift.
//!
//! Layout:
//!
//! ```text
//! expiration            u32 LE (seconds since epoch)
//! ref_block_num         u16 LE
//! ref_block_prefix      u32 LE
//! max_net_usage_words   varuint
//! max_cpu_usage_ms      u8
//! delay_sec             varuint
//! context_free_actions  varuint 0
//! actions               varuint count, then per action:
//!     account           name (8)
//!     name              name (8)
//!     authorization     varuint count, then actor (8) ‖ permission (8) each
//!     data              varuint byte length, then the encoded Data values
//! transaction_extensions varuint 0
//! ```

use tracing::debug;

use super::action::Action;
use super::linking::LinkedTransaction;
use crate::codec::write_varuint;
use crate::crypto::sha256;

/// Appends one action in wire order.
fn write_action(buf: &mut Vec<u8>, action: &Action) {
    buf.extend_from_slice(&action.account().encode());
    buf.extend_from_slice(&action.name().encode());

    write_varuint(buf, action.authorization().len() as u64);
    for auth in action.authorization() {
        buf.extend_from_slice(&auth.encode());
    }

    let data = action.data_bytes();
    write_varuint(buf, data.len() as u64);
    buf.extend_from_slice(&data);
}

/// The chain's canonical encoding of `tx`. Chain id and signatures are not
/// part of it.
pub fn pack(tx: &LinkedTransaction) -> Vec<u8> {
    let header = tx.header();
    let mut buf = Vec::with_capacity(64);

    buf.extend_from_slice(&header.expiration.to_le_bytes());
    buf.extend_from_slice(&header.ref_block_num.to_le_bytes());
    buf.extend_from_slice(&header.ref_block_prefix.to_le_bytes());
    write_varuint(&mut buf, u64::from(header.max_net_usage_words));
    buf.push(header.max_cpu_usage_ms);
    write_varuint(&mut buf, u64::from(header.delay_sec));

    // Context-free actions are not supported.
    write_varuint(&mut buf, 0);

    write_varuint(&mut buf, tx.actions().len() as u64);
    for action in tx.actions() {
        write_action(&mut buf, action);
    }

    // Transaction extensions.
    write_varuint(&mut buf, 0);

    buf
}

/// Lowercase hex of `sha256(pack(tx))`.
pub fn transaction_id(tx: &LinkedTransaction) -> String {
    let id = hex::encode(sha256(&pack(tx)));
    debug!(id = %id, actions = tx.actions().len(), "computed transaction id");
    id
}

impl LinkedTransaction {
    /// See [`pack`].
    pub fn pack(&self) -> Vec<u8> {
        pack(self)
    }

    /// See [`transaction_id`].
    pub fn id(&self) -> String {
        transaction_id(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
