//! Transaction signing.
//!
//! The signing digest commits to the chain as well as the transaction:
//!
//! ```text
//! digest = sha256(chain_id ‖ pack(tx) ‖ context_free_data_digest)
//! ```
//!
//! where the context-free data digest is 32 zero bytes (this engine never
//! attaches context-free data). Signing returns a new [`SignedTransaction`];
//! signing one of those again appends, so independent parties can co-sign
//! the same transaction.

use serde::Serialize;
use tracing::{debug, warn};

use super::error::Result;
use super::linking::{ChainId, LinkedTransaction};
use super::packing::pack;
use crate::config::EMPTY_CONTEXT_FREE_DATA_DIGEST;
use crate::crypto::{sha256_multi, sign_digest, PrivateKey, Signature};
use crate::network::rpc::{ChainResponse, PackedTransaction};
use crate::network::TransactionSubmitter;

/// `sha256(chain_id ‖ packed ‖ zeros(32))`.
pub fn signing_digest(chain_id: &ChainId, packed: &[u8]) -> [u8; 32] {
    sha256_multi(&[chain_id.as_bytes(), packed, &EMPTY_CONTEXT_FREE_DATA_DIGEST])
}

/// Signs `tx` with `key`, producing a transaction with one signature.
pub fn sign_transaction(tx: &LinkedTransaction, key: &PrivateKey) -> Result<SignedTransaction> {
    let signature = sign_digest(key, &tx.signing_digest())?;
    debug!(id = %tx.id(), signer = %key.public_key(), "signed transaction");
    Ok(SignedTransaction {
        transaction: tx.clone(),
        signatures: vec![signature],
    })
}

impl LinkedTransaction {
    pub fn signing_digest(&self) -> [u8; 32] {
        signing_digest(self.chain_id(), &pack(self))
    }

    pub fn sign(&self, key: &PrivateKey) -> Result<SignedTransaction> {
        sign_transaction(self, key)
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A linked transaction plus an append-only list of signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    transaction: LinkedTransaction,
    signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &LinkedTransaction {
        &self.transaction
    }

    /// Signatures in the order they were added.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Same id as the underlying linked transaction; signatures are excluded.
    pub fn id(&self) -> String {
        self.transaction.id()
    }

    pub fn pack(&self) -> Vec<u8> {
        pack(&self.transaction)
    }

    /// Adds another signature, keeping every existing one in place.
    pub fn sign(&self, key: &PrivateKey) -> Result<SignedTransaction> {
        let signature = sign_digest(key, &self.transaction.signing_digest())?;
        let mut signatures = self.signatures.clone();
        signatures.push(signature);
        debug!(
            id = %self.id(),
            signer = %key.public_key(),
            signatures = signatures.len(),
            "co-signed transaction"
        );
        Ok(Self {
            transaction: self.transaction.clone(),
            signatures,
        })
    }

    /// The payload a node's `push_transaction` endpoint expects.
    pub fn to_packed(&self) -> PackedTransaction {
        PackedTransaction::new(
            self.signatures.iter().map(ToString::to_string).collect(),
            &self.pack(),
        )
    }

    /// Hands the packed transaction to `submitter` and returns its answer
    /// unchanged. A chain rejection is an `Ok(ChainResponse::Rejected)`.
    pub async fn send<S>(&self, submitter: &S) -> Result<ChainResponse>
    where
        S: TransactionSubmitter + ?Sized,
    {
        let id = self.id();
        debug!(id = %id, signatures = self.signatures.len(), "submitting transaction");
        let response = submitter.submit(&self.to_packed()).await?;
        if let ChainResponse::Rejected(err) = &response {
            warn!(id = %id, code = err.code, what = %err.error.what, "chain rejected transaction");
        }
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Name;
    use crate::transaction::{Action, Authorization, Data, TransactionHeader};

    const CHAIN_ID: &str = "8a34ec7df1b8cd06ff4a8abbaa7cc50300823350cadc59ab296cb00d104d2b8f";
    const WIF: &str = "5K5UHY2LjHw2QQFJKCd2PdF7hxPJnknMfQLhxbEguJJttr1DFdp";
    const SIGNATURE: &str = "SIG_K1_HMzTApq6UiSA7Ldr6mCKqPKQkrsmUknHiZi4HZt7HMz3ktHHMv4MuRTEUx9Za8VbB6NzcUFh35EBj4Y9wtVjw9qL3t4xYX";

    fn fixture() -> LinkedTransaction {
        let action = Action::parse(
            "user2",
            "sendmsg",
            vec![
                Data::new("from", Name::new("user2").unwrap()),
                Data::new("message", "hello"),
            ],
            vec![Authorization::new("user2", "active").unwrap()],
        )
        .unwrap();
        let header = TransactionHeader {
            expiration: 1_630_328_611,
            ref_block_num: 23631,
            ref_block_prefix: 2938989125,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        };
        LinkedTransaction::new(CHAIN_ID.parse().unwrap(), header, vec![action]).unwrap()
    }

    #[test]
    fn signs_known_fixture() {
        let key: PrivateKey = WIF.parse().unwrap();
        let signed = fixture().sign(&key).unwrap();
        assert_eq!(signed.signatures().len(), 1);
        assert_eq!(signed.signatures()[0].to_string(), SIGNATURE);
    }

    #[test]
    fn signing_twice_appends() {
        let key: PrivateKey = WIF.parse().unwrap();
        let once = fixture().sign(&key).unwrap();
        let twice = once.sign(&key).unwrap();
        assert_eq!(twice.signatures().len(), 2);
        assert_eq!(twice.signatures()[0], once.signatures()[0]);
        // Same key, same digest: RFC 6979 gives the same signature again.
        assert_eq!(twice.signatures()[1], once.signatures()[0]);
        assert_eq!(once.signatures().len(), 1);
    }

    #[test]
    fn co_signing_with_another_key() {
        let first: PrivateKey = WIF.parse().unwrap();
        let second = PrivateKey::generate();
        let signed = fixture().sign(&first).unwrap().sign(&second).unwrap();
        assert_eq!(signed.signatures()[0].to_string(), SIGNATURE);
        assert_ne!(signed.signatures()[1], signed.signatures()[0]);
    }

    #[test]
    fn id_ignores_signatures() {
        let key: PrivateKey = WIF.parse().unwrap();
        let tx = fixture();
        let signed = tx.sign(&key).unwrap();
        assert_eq!(signed.id(), tx.id());
        assert_eq!(signed.pack(), tx.pack());
    }

    #[test]
    fn digest_depends_on_chain_id() {
        let tx = fixture();
        let other_chain: ChainId = "00".repeat(32).parse().unwrap();
        assert_ne!(
            signing_digest(&other_chain, &tx.pack()),
            tx.signing_digest()
        );
    }

    #[test]
    fn packed_payload_carries_signatures_and_hex() {
        let key: PrivateKey = WIF.parse().unwrap();
        let packed = fixture().sign(&key).unwrap().to_packed();
        assert_eq!(packed.signatures, vec![SIGNATURE.to_string()]);
        assert_eq!(packed.compression, "none");
        assert!(packed.packed_context_free_data.is_empty());
        assert!(packed.packed_trx.starts_with("23d72c61"));
    }
}
