// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # eosio-tx
//!
//! Offline command-line front end for the `eosio-tx` library.
//!
//! ## Subcommands
//!
//! - `pack`       - link a transaction and print its packed hex and id
//! - `sign`       - link, sign and print the `push_transaction` body
//! - `public-key` - print the public key of a private key
//! - `version`    - print version information

mod cli;
mod commands;
mod logging;

use clap::Parser;

use crate::cli::{Commands, EosioTxCli};
use crate::logging::{init_logging, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = EosioTxCli::parse();
    init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    let output = match cli.command {
        Commands::Pack(args) => commands::pack(&args).await?,
        Commands::Sign(args) => commands::sign(&args.tx, &args.key).await?,
        Commands::PublicKey(args) => commands::public_key(&args.key)?,
        Commands::Version => {
            print_version();
            return Ok(());
        }
    };
    println!("{output}");
    Ok(())
}

fn print_version() {
    println!("eosio-tx {}", env!("CARGO_PKG_VERSION"));
    println!("  signature scheme: secp256k1 (K1)");
    println!("  compression:      none");
}
