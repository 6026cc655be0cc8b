// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # eosio-tx - Transaction Engine
//!
//! Builds, packs and signs transactions for EOSIO-family chains, byte for
//! byte the way the chain's own nodes expect them.
//!
//! ## Architecture
//!
//! - **codec** - typed values and their canonical binary encodings.
//! - **transaction** - the immutable object model, linking, packing,
//!   signing and offline verification.
//! - **crypto** - SHA-256/RIPEMD-160, K1 keys, recoverable signatures.
//! - **network** - collaborator traits and RPC wire types (no transport).
//! - **config** - protocol constants and overridable header defaults.
//!
//! ## Example
//!
//! ```
//! use eosio_tx::codec::Name;
//! use eosio_tx::crypto::PrivateKey;
//! use eosio_tx::transaction::{Action, Authorization, ChainContext, Data, Transaction};
//!
//! let action = Action::parse(
//!     "user2",
//!     "sendmsg",
//!     vec![
//!         Data::new("from", Name::new("user2").unwrap()),
//!         Data::new("message", "hello"),
//!     ],
//!     vec![Authorization::new("user2", "active").unwrap()],
//! )
//! .unwrap();
//!
//! let context = ChainContext {
//!     chain_id: "8a34ec7df1b8cd06ff4a8abbaa7cc50300823350cadc59ab296cb00d104d2b8f".parse().unwrap(),
//!     ref_block_num: 23631,
//!     ref_block_prefix: 2938989125,
//!     head_block_time: "2021-08-30T12:53:31Z".parse().unwrap(),
//! };
//!
//! let key: PrivateKey = "5K5UHY2LjHw2QQFJKCd2PdF7hxPJnknMfQLhxbEguJJttr1DFdp".parse().unwrap();
//! let signed = Transaction::new(vec![action])
//!     .unwrap()
//!     .link(&context)
//!     .unwrap()
//!     .sign(&key)
//!     .unwrap();
//!
//! assert_eq!(
//!     signed.id(),
//!     "1a634bb62717cb1a94f5312c7d369b95fe7ea3f1f955a8c1907a74cf0d4153d6"
//! );
//! ```
//!
//! ## Design Philosophy
//!
//! 1. One encoder. The id, the signing digest and the wire payload all come
//!    from the same `pack` call.
//! 2. Validate at construction; encoding never fails.
//! 3. Every transition returns a new value.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod network;
pub mod transaction;
