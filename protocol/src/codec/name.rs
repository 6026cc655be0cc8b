//! Chain names: the base32 identifiers used for accounts, actions and
//! permissions.
//!
//! A name packs up to 13 characters into a `u64`. The first twelve take five
//! bits each, left-justified from the most significant bit; the optional
//! thirteenth only gets the remaining four bits, so it is limited to
//! `.12345abcdefghij`. On the wire the integer is written little-endian as a
//! fixed 8-byte field.
//!
//! Two types live here:
//!
//! - [`Name`] - any valid 64-bit name, including the full 13-character form.
//! - [`AccountName`] - a non-empty name with at most 12 significant
//!   characters. `Authorization` and `Action` fields use this one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CodecError;
use super::reader::ByteReader;

/// Symbol table, indexed by 5-bit value.
const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Characters that fit in the five-bit slots.
pub const MAX_NAME_LENGTH: usize = 13;

/// Significant characters allowed in an account, action or permission name.
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 12;

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// A chain name packed into its 64-bit integer form.
///
/// Equality is on the packed value, so `"abc"` and `"abc.."` are the same
/// name (trailing dots are padding).
///
/// ```
/// use eosio_tx::codec::Name;
///
/// let name: Name = "eosio.token".parse().unwrap();
/// assert_eq!(name.to_string(), "eosio.token");
/// assert_eq!(name.as_u64(), 0x5530_ea03_3482_a600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

impl Name {
    /// Parses and packs a name string.
    pub fn new(s: &str) -> Result<Self, CodecError> {
        let invalid = |reason: String| CodecError::InvalidName {
            name: s.to_string(),
            reason,
        };

        if s.len() > MAX_NAME_LENGTH {
            return Err(invalid(format!(
                "{} characters exceeds the maximum of {}",
                s.len(),
                MAX_NAME_LENGTH
            )));
        }

        let mut value: u64 = 0;
        for (i, c) in s.bytes().enumerate() {
            let symbol = char_to_symbol(c)
                .ok_or_else(|| invalid(format!("character {:?} is not in [.1-5a-z]", c as char)))?;
            if i < MAX_NAME_LENGTH - 1 {
                value |= (symbol & 0x1f) << (64 - 5 * (i as u32 + 1));
            } else {
                if symbol > 0x0f {
                    return Err(invalid(format!(
                        "13th character {:?} is not in [.1-5a-j]",
                        c as char
                    )));
                }
                value |= symbol;
            }
        }
        Ok(Self(value))
    }

    /// Wraps an already-packed value. Every `u64` is a valid name.
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// `true` for the all-dots name (packed value zero).
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Canonical 8-byte little-endian encoding.
    pub fn encode(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(u64::from_le_bytes(reader.read_array::<8>()?)))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LENGTH];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LENGTH {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[MAX_NAME_LENGTH - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // CHARMAP is pure ASCII.
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Name {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// AccountName
// ---------------------------------------------------------------------------

/// A validated account identity: non-empty, at most 12 significant
/// characters from the name alphabet.
///
/// Trailing `.` characters are padding and do not count, so
/// `"abcdefghijkl."` is accepted while a thirteen-letter name is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountName(Name);

/// Action names share the account-name rules.
pub type ActionName = AccountName;

/// Permission names share the account-name rules.
pub type PermissionName = AccountName;

impl AccountName {
    pub fn new(s: &str) -> Result<Self, CodecError> {
        let significant = s.trim_end_matches('.');
        if significant.is_empty() {
            return Err(CodecError::InvalidName {
                name: s.to_string(),
                reason: "account names must not be empty".to_string(),
            });
        }
        if significant.len() > MAX_ACCOUNT_NAME_LENGTH {
            return Err(CodecError::InvalidName {
                name: s.to_string(),
                reason: format!(
                    "{} significant characters exceeds the maximum of {}",
                    significant.len(),
                    MAX_ACCOUNT_NAME_LENGTH
                ),
            });
        }
        Name::new(s).map(Self)
    }

    pub const fn name(&self) -> Name {
        self.0
    }

    pub const fn as_u64(&self) -> u64 {
        self.0.as_u64()
    }

    pub fn encode(&self) -> [u8; 8] {
        self.0.encode()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountName {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<AccountName> for Name {
    fn from(account: AccountName) -> Self {
        account.0
    }
}

impl Serialize for AccountName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(s: &str) -> String {
        hex::encode(Name::new(s).unwrap().encode())
    }

    #[test]
    fn known_name_encodings() {
        assert_eq!(hex_of("user2"), "00000000007115d6");
        assert_eq!(hex_of("eosio"), "0000000000ea3055");
        assert_eq!(hex_of("active"), "00000000a8ed3232");
        assert_eq!(hex_of("transfer"), "000000572d3ccdcd");
        assert_eq!(hex_of("eosio.token"), "00a6823403ea3055");
        assert_eq!(hex_of("youraccount1"), "10f2d414217335f5");
        assert_eq!(hex_of("argentinaeos"), "80a932d3e5a9d835");
    }

    #[test]
    fn empty_name_is_zero() {
        let name = Name::new("").unwrap();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "");
    }

    #[test]
    fn thirteen_character_boundary() {
        let max = Name::new("zzzzzzzzzzzzj").unwrap();
        assert_eq!(max.as_u64(), u64::MAX);
        assert_eq!(max.to_string(), "zzzzzzzzzzzzj");

        // 'k' needs five bits; the last slot only has four.
        assert!(Name::new("zzzzzzzzzzzzk").is_err());
        assert!(Name::new("aaaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for bad in ["User2", "user6", "user_2", "us er", "user0"] {
            assert!(Name::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn display_roundtrips_through_u64() {
        for s in ["a", "eosio", "eosio.token", "a.b.c", "youraccount1", "12345"] {
            let name = Name::new(s).unwrap();
            assert_eq!(Name::from_u64(name.as_u64()).to_string(), s);
        }
    }

    #[test]
    fn trailing_dots_are_padding() {
        assert_eq!(Name::new("abc..").unwrap(), Name::new("abc").unwrap());
    }

    #[test]
    fn account_name_allows_twelve_characters() {
        let name = AccountName::new("zzzzzzzzzzzz").unwrap();
        assert_eq!(name.to_string(), "zzzzzzzzzzzz");
        assert!(AccountName::new("abcdefghijkl.").is_ok());
    }

    #[test]
    fn account_name_rejects_thirteen_significant_characters() {
        assert!(AccountName::new("aaaaaaaaaaaaa").is_err());
        assert!(AccountName::new(&"a".repeat(14)).is_err());
    }

    #[test]
    fn account_name_rejects_empty() {
        assert!(AccountName::new("").is_err());
        assert!(AccountName::new("...").is_err());
    }

    #[test]
    fn decode_reads_eight_bytes() {
        let bytes = Name::new("eosio").unwrap().encode();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Name::decode(&mut r).unwrap().to_string(), "eosio");
        r.finish().unwrap();
    }

    #[test]
    fn serde_uses_string_form() {
        let name = AccountName::new("user2").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"user2\"");
        let back: AccountName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<AccountName>("\"Bad\"").is_err());
    }
}
