//! # Chain RPC Wire Types
//!
//! Request and response shapes exchanged with a node's HTTP API. This
//! module defines types only; the transport that carries them lives behind
//! the traits in [`super`].
//!
//! | Endpoint                        | Type                                   |
//! |---------------------------------|----------------------------------------|
//! | `/v1/chain/get_info`            | [`ChainInfo`] (response)               |
//! | `/v1/chain/push_transaction`    | [`PackedTransaction`] (request)        |
//! |                                 | [`ChainResponse`] (response)           |

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NetworkError;
use crate::config::PACKED_TRANSACTION_COMPRESSION;
use crate::transaction::{ChainContext, ChainId};

// ---------------------------------------------------------------------------
// get_info
// ---------------------------------------------------------------------------

/// The subset of `get_info` needed to link a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain_id: ChainId,
    pub head_block_num: u32,
    pub head_block_id: String,
    /// Node timestamps carry no zone suffix and are always UTC.
    pub head_block_time: String,
}

impl ChainInfo {
    /// Fails if `head_block_num` disagrees with the number embedded in
    /// `head_block_id`.
    pub fn to_context(&self) -> Result<ChainContext, NetworkError> {
        let head_block_time = parse_node_time(&self.head_block_time)?;
        let id_num = self
            .head_block_id
            .get(..8)
            .and_then(|prefix| u32::from_str_radix(prefix, 16).ok());
        if id_num != Some(self.head_block_num) {
            return Err(NetworkError::InvalidResponse(format!(
                "head_block_num {} does not match head_block_id {}",
                self.head_block_num, self.head_block_id
            )));
        }
        ChainContext::from_block_id(self.chain_id, &self.head_block_id, head_block_time)
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

/// Parses `2021-08-30T12:53:31.500` (node format) or a full RFC 3339 time.
pub fn parse_node_time(s: &str) -> Result<DateTime<Utc>, NetworkError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| NetworkError::InvalidResponse(format!("bad timestamp {s:?}: {e}")))
}

// ---------------------------------------------------------------------------
// push_transaction
// ---------------------------------------------------------------------------

/// Body of a `push_transaction` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedTransaction {
    pub signatures: Vec<String>,
    pub compression: String,
    pub packed_context_free_data: String,
    pub packed_trx: String,
}

impl PackedTransaction {
    pub fn new(signatures: Vec<String>, packed: &[u8]) -> Self {
        Self {
            signatures,
            compression: PACKED_TRANSACTION_COMPRESSION.to_string(),
            packed_context_free_data: String::new(),
            packed_trx: hex::encode(packed),
        }
    }

    /// The packed transaction bytes.
    pub fn packed_bytes(&self) -> Result<Vec<u8>, NetworkError> {
        hex::decode(&self.packed_trx).map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

/// What the chain answered to a submission.
///
/// Both outcomes are ordinary data. The core does not retry or interpret
/// them beyond this split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainResponse {
    Rejected(ChainError),
    Receipt(Receipt),
}

impl ChainResponse {
    pub fn from_json(value: Value) -> Result<Self, NetworkError> {
        serde_json::from_value(value).map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Receipt(_))
    }
}

/// Successful `push_transaction` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: String,
    /// The node's execution trace, passed through untouched.
    #[serde(default)]
    pub processed: Value,
}

impl Receipt {
    /// `processed.receipt.status`, e.g. `"executed"`.
    pub fn status(&self) -> Option<&str> {
        self.processed.get("receipt")?.get("status")?.as_str()
    }
}

/// Structured error payload returned by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainError {
    /// HTTP-level status code.
    pub code: u16,
    pub message: String,
    pub error: ChainErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainErrorBody {
    /// Chain exception code, e.g. `3040005`.
    pub code: i64,
    pub name: String,
    pub what: String,
    #[serde(default)]
    pub details: Vec<ChainErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainErrorDetail {
    pub message: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub method: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rejection() {
        let response = ChainResponse::from_json(json!({
            "code": 500,
            "message": "Internal Service Error",
            "error": {
                "code": 3040005,
                "name": "expired_tx_exception",
                "what": "Expired Transaction",
                "details": [{
                    "message": "expired transaction 1a634bb6...",
                    "file": "producer_plugin.cpp",
                    "line_number": 378,
                    "method": "on_incoming_transaction_async"
                }]
            }
        }))
        .unwrap();
        match response {
            ChainResponse::Rejected(err) => {
                assert_eq!(err.code, 500);
                assert_eq!(err.error.name, "expired_tx_exception");
                assert_eq!(err.error.what, "Expired Transaction");
                assert_eq!(err.error.details.len(), 1);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn parses_receipt() {
        let response = ChainResponse::from_json(json!({
            "transaction_id": "1a634bb62717cb1a94f5312c7d369b95fe7ea3f1f955a8c1907a74cf0d4153d6",
            "processed": {"receipt": {"status": "executed", "cpu_usage_us": 150}}
        }))
        .unwrap();
        assert!(response.is_accepted());
        match response {
            ChainResponse::Receipt(receipt) => assert_eq!(receipt.status(), Some("executed")),
            other => panic!("expected receipt, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_response_is_an_error() {
        assert!(matches!(
            ChainResponse::from_json(json!({"hello": "world"})),
            Err(NetworkError::InvalidResponse(_))
        ));
    }

    #[test]
    fn packed_transaction_shape() {
        let packed = PackedTransaction::new(vec!["SIG_K1_x".to_string()], &[0xab, 0xcd]);
        assert_eq!(
            serde_json::to_value(&packed).unwrap(),
            json!({
                "signatures": ["SIG_K1_x"],
                "compression": "none",
                "packed_context_free_data": "",
                "packed_trx": "abcd"
            })
        );
        assert_eq!(packed.packed_bytes().unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn chain_info_to_context() {
        let info: ChainInfo = serde_json::from_value(json!({
            "chain_id": "8a34ec7df1b8cd06ff4a8abbaa7cc50300823350cadc59ab296cb00d104d2b8f",
            "head_block_num": 41906,
            "head_block_id": "0000a3b2c1d2e3f4451e2daf000000000000000000000000000000000000ffff",
            "head_block_time": "2021-08-30T12:53:31.500"
        }))
        .unwrap();
        let ctx = info.to_context().unwrap();
        assert_eq!(ctx.ref_block_num, 0xa3b2);
        assert_eq!(ctx.ref_block_prefix, 0xaf2d_1e45);
        assert_eq!(ctx.head_block_time.timestamp(), 1_630_328_011);
    }

    #[test]
    fn chain_info_rejects_mismatched_block_num() {
        let info: ChainInfo = serde_json::from_value(json!({
            "chain_id": "8a34ec7df1b8cd06ff4a8abbaa7cc50300823350cadc59ab296cb00d104d2b8f",
            "head_block_num": 41907,
            "head_block_id": "0000a3b2c1d2e3f4451e2daf000000000000000000000000000000000000ffff",
            "head_block_time": "2021-08-30T12:53:31.500"
        }))
        .unwrap();
        assert!(matches!(
            info.to_context(),
            Err(NetworkError::InvalidResponse(_))
        ));
    }

    #[test]
    fn node_time_accepts_rfc3339() {
        let t = parse_node_time("2021-08-30T12:53:31Z").unwrap();
        assert_eq!(t.timestamp(), 1_630_328_011);
        assert!(parse_node_time("yesterday").is_err());
    }
}
