//! Leaf value types of the object model: [`Authorization`] and [`Data`].
//!
//! Both are immutable once built. Their serde forms are the canonical JSON
//! shapes used by transaction files, and deserializing runs the same
//! validation as the constructors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::error::{Result, TransactionError};
use crate::codec::{AccountName, PermissionName, TypeTag, TypedValue};

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// A `(actor, permission)` pair naming who authorizes an action.
///
/// ```
/// use eosio_tx::transaction::Authorization;
///
/// let auth = Authorization::new("user2", "active").unwrap();
/// assert_eq!(auth.actor().to_string(), "user2");
/// assert!(Authorization::new("User2", "active").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Authorization {
    actor: AccountName,
    permission: PermissionName,
}

impl Authorization {
    /// Parses and validates both names.
    pub fn new(actor: &str, permission: &str) -> Result<Self> {
        Ok(Self {
            actor: actor.parse()?,
            permission: permission.parse()?,
        })
    }

    pub fn from_names(actor: AccountName, permission: PermissionName) -> Self {
        Self { actor, permission }
    }

    pub fn actor(&self) -> AccountName {
        self.actor
    }

    pub fn permission(&self) -> PermissionName {
        self.permission
    }

    /// Actor name followed by permission name, 16 bytes.
    pub fn encode(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.actor.encode());
        out[8..].copy_from_slice(&self.permission.encode());
        out
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

const DATA_KEYS: [&str; 3] = ["name", "type", "value"];

/// One named field of an action payload.
///
/// The type tag is derived from the value, never supplied separately. Only
/// the encoded value reaches the wire; `name` and the tag exist for
/// introspection and for the three-key map form:
///
/// ```
/// use eosio_tx::codec::TypedValue;
/// use eosio_tx::transaction::Data;
///
/// let data = Data::new("message", "hello");
/// assert_eq!(hex::encode(data.encode()), "0568656c6c6f");
///
/// let map = data.to_map();
/// assert_eq!(map["type"], "String");
/// assert_eq!(Data::from_map(&map).unwrap(), data);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    name: String,
    value: TypedValue,
}

impl Data {
    pub fn new(name: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }

    pub fn type_tag(&self) -> TypeTag {
        self.value.type_tag()
    }

    /// The encoded value bytes; `name` and the type tag are not included.
    pub fn encode(&self) -> Vec<u8> {
        self.value.encode()
    }

    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        self.value.encode_into(buf);
    }

    /// The canonical `{name, type, value}` form.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from(self.name.clone()));
        map.insert("type".to_string(), Value::from(self.type_tag().to_string()));
        map.insert("value".to_string(), self.value.to_json());
        map
    }

    /// Rebuilds a `Data` from its map form.
    ///
    /// The key set must be exactly `name`, `type`, `value`: a missing key
    /// and an extra key are both rejected.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        if map.len() != DATA_KEYS.len() || !DATA_KEYS.iter().all(|k| map.contains_key(*k)) {
            let mut found: Vec<String> = map.keys().cloned().collect();
            found.sort();
            return Err(TransactionError::DataMapShape { found });
        }
        let shape_error = || TransactionError::DataMapShape {
            found: DATA_KEYS.iter().map(|k| k.to_string()).collect(),
        };
        let name = map["name"].as_str().ok_or_else(shape_error)?;
        let tag: TypeTag = map["type"].as_str().ok_or_else(shape_error)?.parse()?;
        let value = TypedValue::from_json(&tag, &map["value"])?;
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(&map).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
