//! Token quantities: `Symbol` and `Asset`.
//!
//! An asset is written as `"<amount> <CODE>"`, e.g. `"1.0000 EOS"`. The
//! number of fractional digits *is* the symbol precision, so `"1.0000 EOS"`
//! and `"1.00 EOS"` are different symbols.
//!
//! Wire layout (16 bytes):
//!
//! ```text
//! amount    i64 little-endian, scaled by 10^precision
//! precision u8
//! code      7 bytes ASCII, NUL-padded
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CodecError;
use super::reader::ByteReader;

/// Maximum number of characters in a symbol code.
pub const MAX_SYMBOL_CODE_LENGTH: usize = 7;

/// Maximum decimal precision a symbol may declare.
pub const MAX_PRECISION: u8 = 18;

/// Largest absolute amount the chain accepts: `2^62 - 1`.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// A token symbol: decimal precision plus an uppercase code of 1–7 letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    precision: u8,
    code: String,
}

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, CodecError> {
        let invalid = |reason: String| CodecError::InvalidSymbol {
            symbol: format!("{},{}", precision, code),
            reason,
        };
        if precision > MAX_PRECISION {
            return Err(invalid(format!(
                "precision {} exceeds the maximum of {}",
                precision, MAX_PRECISION
            )));
        }
        if code.is_empty() || code.len() > MAX_SYMBOL_CODE_LENGTH {
            return Err(invalid(format!(
                "code must be 1 to {} characters",
                MAX_SYMBOL_CODE_LENGTH
            )));
        }
        if !code.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid("code must be uppercase A-Z".to_string()));
        }
        Ok(Self {
            precision,
            code: code.to_string(),
        })
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Precision byte followed by the NUL-padded code.
    pub fn encode(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[0] = self.precision;
        out[1..1 + self.code.len()].copy_from_slice(self.code.as_bytes());
        out
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let raw = reader.read_array::<8>()?;
        let code_len = raw[1..].iter().position(|&b| b == 0).unwrap_or(7);
        if raw[1 + code_len..].iter().any(|&b| b != 0) {
            return Err(CodecError::InvalidSymbol {
                symbol: hex::encode(raw),
                reason: "non-zero byte in code padding".to_string(),
            });
        }
        let code = String::from_utf8(raw[1..1 + code_len].to_vec())?;
        Self::new(raw[0], &code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = CodecError;

    /// Parses the `"4,EOS"` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s.split_once(',').ok_or_else(|| CodecError::InvalidSymbol {
            symbol: s.to_string(),
            reason: "expected <precision>,<CODE>".to_string(),
        })?;
        let precision = precision
            .trim()
            .parse::<u8>()
            .map_err(|e| CodecError::InvalidSymbol {
                symbol: s.to_string(),
                reason: e.to_string(),
            })?;
        Self::new(precision, code.trim())
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A fixed-point token quantity.
///
/// ```
/// use eosio_tx::codec::Asset;
///
/// let asset: Asset = "1.0000 EOS".parse().unwrap();
/// assert_eq!(asset.amount(), 10_000);
/// assert_eq!(asset.symbol().precision(), 4);
/// assert_eq!(asset.to_string(), "1.0000 EOS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Builds an asset from an already-scaled amount.
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, CodecError> {
        if amount.checked_abs().map_or(true, |a| a > MAX_AMOUNT) {
            return Err(CodecError::InvalidAsset {
                asset: format!("{} {}", amount, symbol.code),
                reason: format!("amount magnitude exceeds {}", MAX_AMOUNT),
            });
        }
        Ok(Self { amount, symbol })
    }

    /// The scaled integer amount (`"1.0000 EOS"` is `10000`).
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn encode(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.amount.to_le_bytes());
        out[8..].copy_from_slice(&self.symbol.encode());
        out
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let amount = i64::from_le_bytes(reader.read_array::<8>()?);
        let symbol = Symbol::decode(reader)?;
        Self::new(amount, symbol)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let precision = self.symbol.precision as u32;
        if precision == 0 {
            return write!(f, "{}{} {}", sign, magnitude, self.symbol.code);
        }
        let divisor = 10u64.pow(precision);
        write!(
            f,
            "{}{}.{:0>width$} {}",
            sign,
            magnitude / divisor,
            magnitude % divisor,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl FromStr for Asset {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CodecError::InvalidAsset {
            asset: s.to_string(),
            reason: reason.to_string(),
        };

        let (quantity, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("expected \"<amount> <CODE>\""))?;
        let code = code.trim();

        let (negative, unsigned) = match quantity.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, quantity),
        };
        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };
        if whole.is_empty() || (unsigned.contains('.') && frac.is_empty()) {
            return Err(invalid("malformed amount"));
        }
        if !whole.bytes().chain(frac.bytes()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be decimal digits"));
        }

        let precision =
            u8::try_from(frac.len()).map_err(|_| invalid("too many fractional digits"))?;
        let symbol = Symbol::new(precision, code)?;

        let digits = format!("{}{}", whole, frac);
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| invalid("amount does not fit in 64 bits"))?;
        let amount = if negative { -magnitude } else { magnitude };
        Self::new(amount, symbol)
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
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

    #[test]
    fn parse_and_encode_eos() {
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        assert_eq!(
            hex::encode(asset.encode()),
            "102700000000000004454f5300000000"
        );
    }

    #[test]
    fn zero_precision_large_amount() {
        let asset: Asset = format!("{} WAX", 1u64 << 61).parse().unwrap();
        assert_eq!(asset.symbol().precision(), 0);
        assert_eq!(
            hex::encode(asset.encode()),
            "00000000000000200057415800000000"
        );
        assert_eq!(asset.to_string(), "2305843009213693952 WAX");
    }

    #[test]
    fn negative_amounts_display() {
        let asset: Asset = "-0.0050 TOK".parse().unwrap();
        assert_eq!(asset.amount(), -50);
        assert_eq!(asset.to_string(), "-0.0050 TOK");
    }

    #[test]
    fn rejects_malformed_quantities() {
        for bad in ["1.0000", "1. EOS", ".5 EOS", "1,0 EOS", "1.0 eos", "1.0 TOOLONGX", "abc EOS"] {
            assert!(bad.parse::<Asset>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_amount_beyond_chain_maximum() {
        assert!(Asset::new(MAX_AMOUNT, Symbol::new(0, "EOS").unwrap()).is_ok());
        assert!(Asset::new(MAX_AMOUNT + 1, Symbol::new(0, "EOS").unwrap()).is_err());
        assert!(Asset::new(i64::MIN, Symbol::new(0, "EOS").unwrap()).is_err());
    }

    #[test]
    fn symbol_parse_and_limits() {
        let sym: Symbol = "4,EOS".parse().unwrap();
        assert_eq!(sym.precision(), 4);
        assert_eq!(sym.code(), "EOS");
        assert_eq!(sym.to_string(), "4,EOS");
        assert!(Symbol::new(19, "EOS").is_err());
        assert!(Symbol::new(4, "").is_err());
    }

    #[test]
    fn decode_matches_encode() {
        let asset: Asset = "12.345 ABC".parse().unwrap();
        let bytes = asset.encode();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Asset::decode(&mut r).unwrap(), asset);
        r.finish().unwrap();
    }

    #[test]
    fn symbol_decode_rejects_bytes_after_padding() {
        // 4,EOS with a stray byte after the terminating NUL.
        let bytes = [4, b'E', b'O', b'S', 0, b'X', 0, 0];
        assert!(matches!(
            Symbol::decode(&mut ByteReader::new(&bytes)),
            Err(CodecError::InvalidSymbol { .. })
        ));

        let clean = [4, b'E', b'O', b'S', 0, 0, 0, 0];
        assert_eq!(Symbol::decode(&mut ByteReader::new(&clean)).unwrap().code(), "EOS");
    }
}
