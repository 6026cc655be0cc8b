//! Offline verification of signed transactions.
//!
//! The chain checks signatures by recovering public keys from them and
//! matching those against the required authorities. The same recovery is
//! available here so a caller can check a co-signed transaction before
//! submitting it.

use super::error::{Result, TransactionError};
use super::signing::SignedTransaction;
use crate::crypto::PublicKey;

impl SignedTransaction {
    /// Public keys recovered from each signature, in signature order.
    pub fn recover_signers(&self) -> Result<Vec<PublicKey>> {
        let digest = self.transaction().signing_digest();
        self.signatures()
            .iter()
            .map(|sig| sig.recover(&digest).map_err(TransactionError::from))
            .collect()
    }

    /// `true` if any signature recovers to `key`.
    pub fn verify_signed_by(&self, key: &PublicKey) -> Result<bool> {
        Ok(self.recover_signers()?.contains(key))
    }
}

/// Checks that every key in `required` has signed `tx`.
pub fn verify_transaction(tx: &SignedTransaction, required: &[PublicKey]) -> Result<()> {
    let signers = tx.recover_signers()?;
    match required.iter().find(|key| !signers.contains(*key)) {
        Some(missing) => Err(TransactionError::MissingSignature(*missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;
    use crate::transaction::{
        Action, Authorization, ChainContext, Data, LinkedTransaction, Transaction,
    };

    fn linked() -> LinkedTransaction {
        let action = Action::parse(
            "alice",
            "ping",
            vec![Data::new("seq", 7u32)],
            vec![Authorization::new("alice", "active").unwrap()],
        )
        .unwrap();
        let ctx = ChainContext {
            chain_id: "11".repeat(32).parse().unwrap(),
            ref_block_num: 1,
            ref_block_prefix: 2,
            head_block_time: "2024-01-01T00:00:00Z".parse().unwrap(),
        };
        Transaction::new(vec![action]).unwrap().link(&ctx).unwrap()
    }

    #[test]
    fn recovers_signers_in_order() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        let signed = linked().sign(&a).unwrap().sign(&b).unwrap();
        assert_eq!(
            signed.recover_signers().unwrap(),
            vec![a.public_key(), b.public_key()]
        );
    }

    #[test]
    fn verify_signed_by_distinguishes_keys() {
        let a = PrivateKey::generate();
        let stranger = PrivateKey::generate();
        let signed = linked().sign(&a).unwrap();
        assert!(signed.verify_signed_by(&a.public_key()).unwrap());
        assert!(!signed.verify_signed_by(&stranger.public_key()).unwrap());
    }

    #[test]
    fn verify_transaction_reports_missing_signer() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        let signed = linked().sign(&a).unwrap();
        assert!(verify_transaction(&signed, &[a.public_key()]).is_ok());
        match verify_transaction(&signed, &[a.public_key(), b.public_key()]) {
            Err(TransactionError::MissingSignature(key)) => assert_eq!(key, b.public_key()),
            other => panic!("expected MissingSignature, got {other:?}"),
        }
    }
}
