//! # CLI Interface
//!
//! Command-line arguments for `eosio-tx`, defined with `clap` derive.
//! Subcommands: `pack`, `sign`, `public-key` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Offline packing and signing of EOSIO-family transactions.
#[derive(Parser, Debug)]
#[command(
    name = "eosio-tx",
    about = "Pack and sign EOSIO-family transactions",
    version,
    propagate_version = true
)]
pub struct EosioTxCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "EOSIO_TX_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Link a transaction and print its packed hex and id.
    Pack(TxArgs),
    /// Link and sign a transaction; print the push_transaction payload.
    Sign(SignArgs),
    /// Print the public key of a private key in both text forms.
    PublicKey(KeyArgs),
    /// Print version information and exit.
    Version,
}

/// Inputs shared by `pack` and `sign`.
#[derive(Args, Debug)]
pub struct TxArgs {
    /// Transaction JSON: `{"actions": [...], "options": {...}}`.
    #[arg(long)]
    pub tx: PathBuf,

    /// Chain context JSON, or a saved `get_info` response.
    #[arg(long)]
    pub context: PathBuf,

    /// Header options JSON; replaces the options in the transaction file.
    #[arg(long, short = 'c', env = "EOSIO_TX_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub tx: TxArgs,

    /// Private key, WIF or PVT_K1_. Prefer the environment variable.
    #[arg(long, env = "EOSIO_PRIVATE_KEY", hide_env_values = true)]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Private key, WIF or PVT_K1_.
    #[arg(long, env = "EOSIO_PRIVATE_KEY", hide_env_values = true)]
    pub key: String,
}
