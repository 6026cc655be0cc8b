//! [`Action`]: one contract call with its payload and authorizations.

use serde::{Deserialize, Serialize};

use super::error::{Result, TransactionError};
use super::types::{Authorization, Data};
use crate::codec::{AccountName, ActionName};

/// A call to `name` on contract `account`.
///
/// The authorization list is never empty; that is checked on construction
/// and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction")]
pub struct Action {
    account: AccountName,
    name: ActionName,
    data: Vec<Data>,
    authorization: Vec<Authorization>,
}

/// Unvalidated shape used only as the serde entry point.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    account: AccountName,
    name: ActionName,
    #[serde(default)]
    data: Vec<Data>,
    authorization: Vec<Authorization>,
}

impl TryFrom<RawAction> for Action {
    type Error = TransactionError;

    fn try_from(raw: RawAction) -> Result<Self> {
        Self::new(raw.account, raw.name, raw.data, raw.authorization)
    }
}

impl Action {
    pub fn new(
        account: AccountName,
        name: ActionName,
        data: Vec<Data>,
        authorization: Vec<Authorization>,
    ) -> Result<Self> {
        if authorization.is_empty() {
            return Err(TransactionError::NoAuthorization {
                account: account.to_string(),
                name: name.to_string(),
            });
        }
        Ok(Self {
            account,
            name,
            data,
            authorization,
        })
    }

    /// String-parsing convenience over [`Action::new`].
    pub fn parse(
        account: &str,
        name: &str,
        data: Vec<Data>,
        authorization: Vec<Authorization>,
    ) -> Result<Self> {
        Self::new(account.parse()?, name.parse()?, data, authorization)
    }

    pub fn account(&self) -> AccountName {
        self.account
    }

    pub fn name(&self) -> ActionName {
        self.name
    }

    pub fn data(&self) -> &[Data] {
        &self.data
    }

    pub fn authorization(&self) -> &[Authorization] {
        &self.authorization
    }

    /// Concatenated encodings of every `Data` value, in order.
    pub fn data_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for field in &self.data {
            field.encode_into(&mut buf);
        }
        buf
    }
}
