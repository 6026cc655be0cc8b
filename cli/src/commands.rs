//! Command implementations.
//!
//! Each command returns the text it would print so that tests can check
//! the output without capturing stdout.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use eosio_tx::config::TransactionOptions;
use eosio_tx::crypto::PrivateKey;
use eosio_tx::network::{ChainInfo, StaticContext};
use eosio_tx::transaction::{ChainContext, LinkedTransaction, Transaction};

use crate::cli::TxArgs;

/// Either a literal chain context or a saved `get_info` response.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContextFile {
    Context(ChainContext),
    Info(ChainInfo),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid {what} in {}", path.display()))
}

pub fn load_transaction(path: &Path, config: Option<&Path>) -> Result<Transaction> {
    let tx: Transaction = read_json(path, "transaction")?;
    let Some(config) = config else {
        return Ok(tx);
    };
    let options: TransactionOptions = read_json(config, "options")?;
    debug!(config = %config.display(), "overriding transaction options");
    Ok(Transaction::with_options(tx.actions().to_vec(), options)?)
}

pub fn load_context(path: &Path) -> Result<ChainContext> {
    match read_json(path, "chain context")? {
        ContextFile::Context(ctx) => Ok(ctx),
        ContextFile::Info(info) => info
            .to_context()
            .with_context(|| format!("unusable get_info response in {}", path.display())),
    }
}

async fn link(args: &TxArgs) -> Result<LinkedTransaction> {
    let tx = load_transaction(&args.tx, args.config.as_deref())?;
    let source = StaticContext::new(load_context(&args.context)?);
    let linked = tx.link_with(&source).await.context("failed to link transaction")?;
    info!(
        actions = linked.actions().len(),
        expiration = linked.header().expiration,
        "transaction linked"
    );
    Ok(linked)
}

/// `pack`: the packed hex and the transaction id.
pub async fn pack(args: &TxArgs) -> Result<String> {
    let linked = link(args).await?;
    let out = serde_json::json!({
        "id": linked.id(),
        "packed_trx": hex::encode(linked.pack()),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// `sign`: the `push_transaction` request body.
pub async fn sign(args: &TxArgs, key: &str) -> Result<String> {
    let key: PrivateKey = key.trim().parse().context("invalid private key")?;
    let signed = link(args).await?.sign(&key).context("failed to sign transaction")?;
    info!(id = %signed.id(), signer = %key.public_key(), "transaction signed");
    Ok(serde_json::to_string_pretty(&signed.to_packed())?)
}

/// `public-key`: both text forms of the key's public half.
pub fn public_key(key: &str) -> Result<String> {
    let key: PrivateKey = key.trim().parse().context("invalid private key")?;
    let public = key.public_key();
    let out: Value = serde_json::json!({
        "public_key": public.to_string(),
        "legacy": public.to_legacy_string(),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const WIF: &str = "5K5UHY2LjHw2QQFJKCd2PdF7hxPJnknMfQLhxbEguJJttr1DFdp";
    const CHAIN_ID: &str = "8a34ec7df1b8cd06ff4a8abbaa7cc50300823350cadc59ab296cb00d104d2b8f";
    const PACKED: &str = "23d72c614f5c456a2daf000000000100000000007115d6000000806199a6c20100000000007115d600000000a8ed32320e00000000007115d60568656c6c6f00";
    const ID: &str = "1a634bb62717cb1a94f5312c7d369b95fe7ea3f1f955a8c1907a74cf0d4153d6";
    const SIGNATURE: &str = "SIG_K1_HMzTApq6UiSA7Ldr6mCKqPKQkrsmUknHiZi4HZt7HMz3ktHHMv4MuRTEUx9Za8VbB6NzcUFh35EBj4Y9wtVjw9qL3t4xYX";

    fn write(value: Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        file
    }

    fn tx_file() -> NamedTempFile {
        write(serde_json::json!({
            "actions": [{
                "account": "user2",
                "name": "sendmsg",
                "data": [
                    {"name": "from", "type": "Name", "value": "user2"},
                    {"name": "message", "type": "String", "value": "hello"}
                ],
                "authorization": [{"actor": "user2", "permission": "active"}]
            }]
        }))
    }

    fn context_file() -> NamedTempFile {
        write(serde_json::json!({
            "chain_id": CHAIN_ID,
            "ref_block_num": 23631,
            "ref_block_prefix": 2938989125u32,
            "head_block_time": "2021-08-30T12:53:31Z"
        }))
    }

    fn args(tx: &NamedTempFile, ctx: &NamedTempFile, config: Option<PathBuf>) -> TxArgs {
        TxArgs {
            tx: tx.path().to_path_buf(),
            context: ctx.path().to_path_buf(),
            config,
        }
    }

    #[tokio::test]
    async fn pack_prints_fixture_bytes_and_id() {
        let (tx, ctx) = (tx_file(), context_file());
        let out: Value = serde_json::from_str(&pack(&args(&tx, &ctx, None)).await.unwrap()).unwrap();
        assert_eq!(out["packed_trx"], PACKED);
        assert_eq!(out["id"], ID);
    }

    #[tokio::test]
    async fn sign_prints_push_payload() {
        let (tx, ctx) = (tx_file(), context_file());
        let out: Value =
            serde_json::from_str(&sign(&args(&tx, &ctx, None), WIF).await.unwrap()).unwrap();
        assert_eq!(out["signatures"][0], SIGNATURE);
        assert_eq!(out["compression"], "none");
        assert_eq!(out["packed_trx"], PACKED);
    }

    #[tokio::test]
    async fn config_file_replaces_options() {
        let (tx, ctx) = (tx_file(), context_file());
        let config = write(serde_json::json!({"expiration_delay_sec": 30}));
        let out: Value = serde_json::from_str(
            &pack(&args(&tx, &ctx, Some(config.path().to_path_buf()))).await.unwrap(),
        )
        .unwrap();
        assert_ne!(out["packed_trx"], PACKED);
    }

    #[test]
    fn context_accepts_get_info_response() {
        let info = write(serde_json::json!({
            "chain_id": CHAIN_ID,
            "head_block_num": 1,
            "head_block_id": "00000001".to_string() + &"00".repeat(28),
            "head_block_time": "2021-08-30T12:53:31.500"
        }));
        let ctx = load_context(info.path()).unwrap();
        assert_eq!(ctx.ref_block_num, 1);
        assert_eq!(ctx.chain_id.to_string(), CHAIN_ID);
    }

    #[test]
    fn public_key_prints_both_forms() {
        let out: Value = serde_json::from_str(&public_key(WIF).unwrap()).unwrap();
        assert_eq!(out["public_key"], "PUB_K1_5sRtLNDzsd9arp7J7qYSRRTcaLnRQFVkYtRuHn8tPeNSCgxxVY");
        assert_eq!(out["legacy"], "EOS5sRtLNDzsd9arp7J7qYSRRTcaLnRQFVkYtRuHn8tPeNS8D7DVM");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_transaction(Path::new("/nonexistent/tx.json"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tx.json"));
    }
}
