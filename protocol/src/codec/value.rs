//! The closed set of built-in value types and their canonical encodings.
//!
//! [`TypedValue`] is a tagged union: the variant is chosen from the concrete
//! Rust value the caller supplies, and each variant knows its own byte
//! layout and human-readable [`TypeTag`]. There is no open-ended dispatch;
//! adding a type means adding a variant here.
//!
//! | Tag          | Encoding                                       | JSON form        |
//! |--------------|------------------------------------------------|------------------|
//! | `Bool`       | 1 byte, `0`/`1`                                | bool             |
//! | `Int8..64`   | 1/2/4/8 bytes, little-endian two's complement  | number           |
//! | `Uint8..64`  | 1/2/4/8 bytes, little-endian                   | number           |
//! | `Varuint32`  | varuint                                        | number           |
//! | `Name`       | 8 bytes, packed base32                         | string           |
//! | `String`     | varuint length + UTF-8                         | string           |
//! | `Bytes`      | varuint length + raw bytes                     | hex string       |
//! | `Asset`      | i64 amount + 8-byte symbol                     | `"1.0000 EOS"`   |
//! | `Array<T>`   | varuint count + each element                   | list             |
//! | `Wasm`       | varuint length + raw file contents             | hex string       |

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::asset::Asset;
use super::blob::Wasm;
use super::error::CodecError;
use super::name::Name;
use super::reader::ByteReader;
use super::varint::{read_varuint, write_varuint};
use crate::config::MAX_ARRAY_NESTING;

// ---------------------------------------------------------------------------
// TypeTag
// ---------------------------------------------------------------------------

/// Human-readable name of a value type, as it appears in the `type` key of
/// the serialized `Data` map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Varuint32,
    Name,
    String,
    Bytes,
    Asset,
    /// Homogeneous array; written `Array<Element>`.
    Array(Box<TypeTag>),
    Wasm,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bool => "Bool",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Uint8 => "Uint8",
            Self::Uint16 => "Uint16",
            Self::Uint32 => "Uint32",
            Self::Uint64 => "Uint64",
            Self::Varuint32 => "Varuint32",
            Self::Name => "Name",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Asset => "Asset",
            Self::Array(inner) => return write!(f, "Array<{}>", inner),
            Self::Wasm => "Wasm",
        };
        f.write_str(s)
    }
}

impl FromStr for TypeTag {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut depth = 0;
        let mut rest = s;
        while let Some(inner) = rest.strip_prefix("Array<").and_then(|r| r.strip_suffix('>')) {
            depth += 1;
            if depth > MAX_ARRAY_NESTING {
                return Err(CodecError::NestingTooDeep {
                    depth,
                    limit: MAX_ARRAY_NESTING,
                });
            }
            rest = inner;
        }
        let mut tag = Self::scalar(rest)?;
        for _ in 0..depth {
            tag = Self::Array(Box::new(tag));
        }
        Ok(tag)
    }
}

impl TypeTag {
    fn scalar(s: &str) -> Result<Self, CodecError> {
        Ok(match s {
            "Bool" => Self::Bool,
            "Int8" => Self::Int8,
            "Int16" => Self::Int16,
            "Int32" => Self::Int32,
            "Int64" => Self::Int64,
            "Uint8" => Self::Uint8,
            "Uint16" => Self::Uint16,
            "Uint32" => Self::Uint32,
            "Uint64" => Self::Uint64,
            "Varuint32" => Self::Varuint32,
            "Name" => Self::Name,
            "String" => Self::String,
            "Bytes" => Self::Bytes,
            "Asset" => Self::Asset,
            "Wasm" => Self::Wasm,
            other => return Err(CodecError::UnknownType(other.to_string())),
        })
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

/// A homogeneous array. Every element's tag equals `element_type`; this is
/// checked once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    element_type: TypeTag,
    values: Vec<TypedValue>,
}

impl Array {
    pub fn new(element_type: TypeTag, values: Vec<TypedValue>) -> Result<Self, CodecError> {
        for (index, value) in values.iter().enumerate() {
            let found = value.type_tag();
            if found != element_type {
                return Err(CodecError::ArrayTypeMismatch {
                    index,
                    expected: element_type,
                    found,
                });
            }
        }
        Ok(Self {
            element_type,
            values,
        })
    }

    pub fn element_type(&self) -> &TypeTag {
        &self.element_type
    }

    pub fn values(&self) -> &[TypedValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TypedValue
// ---------------------------------------------------------------------------

/// A value of one of the built-in codec types.
///
/// ```
/// use eosio_tx::codec::{Name, TypedValue};
///
/// let value = TypedValue::from(Name::new("user2").unwrap());
/// assert_eq!(value.to_hex(), "00000000007115d6");
/// assert_eq!(value.type_tag().to_string(), "Name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Varuint32(u32),
    Name(Name),
    String(String),
    Bytes(Vec<u8>),
    Asset(Asset),
    Array(Array),
    Wasm(Wasm),
}

impl TypedValue {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Int8(_) => TypeTag::Int8,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Uint8(_) => TypeTag::Uint8,
            Self::Uint16(_) => TypeTag::Uint16,
            Self::Uint32(_) => TypeTag::Uint32,
            Self::Uint64(_) => TypeTag::Uint64,
            Self::Varuint32(_) => TypeTag::Varuint32,
            Self::Name(_) => TypeTag::Name,
            Self::String(_) => TypeTag::String,
            Self::Bytes(_) => TypeTag::Bytes,
            Self::Asset(_) => TypeTag::Asset,
            Self::Array(a) => TypeTag::Array(Box::new(a.element_type.clone())),
            Self::Wasm(_) => TypeTag::Wasm,
        }
    }

    /// Canonical binary encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        buf
    }

    /// Appends the canonical encoding to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Bool(v) => buf.push(u8::from(*v)),
            Self::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Int16(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Uint8(v) => buf.push(*v),
            Self::Uint16(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Uint32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Uint64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Varuint32(v) => write_varuint(buf, u64::from(*v)),
            Self::Name(n) => buf.extend_from_slice(&n.encode()),
            Self::String(s) => {
                write_varuint(buf, s.len() as u64);
                buf.extend_from_slice(s.as_bytes());
            }
            Self::Bytes(b) => {
                write_varuint(buf, b.len() as u64);
                buf.extend_from_slice(b);
            }
            Self::Asset(a) => buf.extend_from_slice(&a.encode()),
            Self::Array(a) => {
                write_varuint(buf, a.values.len() as u64);
                for value in &a.values {
                    value.encode_into(buf);
                }
            }
            Self::Wasm(w) => w.encode_into(buf),
        }
    }

    /// Lowercase hex of [`encode`](Self::encode).
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Reads one value of type `tag` from the cursor.
    pub fn decode(tag: &TypeTag, reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(match tag {
            TypeTag::Bool => match reader.read_u8()? {
                0 => Self::Bool(false),
                1 => Self::Bool(true),
                other => {
                    return Err(CodecError::OutOfRange {
                        type_tag: TypeTag::Bool,
                        value: other.to_string(),
                    })
                }
            },
            TypeTag::Int8 => Self::Int8(i8::from_le_bytes(reader.read_array()?)),
            TypeTag::Int16 => Self::Int16(i16::from_le_bytes(reader.read_array()?)),
            TypeTag::Int32 => Self::Int32(i32::from_le_bytes(reader.read_array()?)),
            TypeTag::Int64 => Self::Int64(i64::from_le_bytes(reader.read_array()?)),
            TypeTag::Uint8 => Self::Uint8(reader.read_u8()?),
            TypeTag::Uint16 => Self::Uint16(u16::from_le_bytes(reader.read_array()?)),
            TypeTag::Uint32 => Self::Uint32(u32::from_le_bytes(reader.read_array()?)),
            TypeTag::Uint64 => Self::Uint64(u64::from_le_bytes(reader.read_array()?)),
            TypeTag::Varuint32 => {
                let raw = read_varuint(reader)?;
                Self::Varuint32(u32::try_from(raw).map_err(|_| CodecError::OutOfRange {
                    type_tag: TypeTag::Varuint32,
                    value: raw.to_string(),
                })?)
            }
            TypeTag::Name => Self::Name(Name::decode(reader)?),
            TypeTag::String => {
                let len = read_varuint(reader)? as usize;
                Self::String(String::from_utf8(reader.read_slice(len)?.to_vec())?)
            }
            TypeTag::Bytes => {
                let len = read_varuint(reader)? as usize;
                Self::Bytes(reader.read_slice(len)?.to_vec())
            }
            TypeTag::Asset => Self::Asset(Asset::decode(reader)?),
            TypeTag::Array(element) => {
                let count = read_varuint(reader)? as usize;
                // Each element takes at least one byte; cap the reservation.
                let mut values = Vec::with_capacity(count.min(reader.remaining()));
                for _ in 0..count {
                    values.push(Self::decode(element, reader)?);
                }
                Self::Array(Array::new((**element).clone(), values)?)
            }
            TypeTag::Wasm => Self::Wasm(Wasm::decode(reader)?),
        })
    }

    /// Decodes a complete hex-encoded value; leftover bytes are an error.
    pub fn from_hex(tag: &TypeTag, s: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(s)?;
        let mut reader = ByteReader::new(&bytes);
        let value = Self::decode(tag, &mut reader)?;
        reader.finish()?;
        Ok(value)
    }

    /// JSON form used by the `value` key of the serialized `Data` map.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(v) => Value::from(*v),
            Self::Int8(v) => Value::from(*v),
            Self::Int16(v) => Value::from(*v),
            Self::Int32(v) => Value::from(*v),
            Self::Int64(v) => Value::from(*v),
            Self::Uint8(v) => Value::from(*v),
            Self::Uint16(v) => Value::from(*v),
            Self::Uint32(v) => Value::from(*v),
            Self::Uint64(v) => Value::from(*v),
            Self::Varuint32(v) => Value::from(*v),
            Self::Name(n) => Value::from(n.to_string()),
            Self::String(s) => Value::from(s.clone()),
            Self::Bytes(b) => Value::from(hex::encode(b)),
            Self::Asset(a) => Value::from(a.to_string()),
            Self::Array(a) => Value::Array(a.values.iter().map(Self::to_json).collect()),
            Self::Wasm(w) => Value::from(w.to_hex()),
        }
    }

    /// Rebuilds a value of type `tag` from its JSON form, enforcing the
    /// type's range and alphabet.
    pub fn from_json(tag: &TypeTag, json: &Value) -> Result<Self, CodecError> {
        Ok(match tag {
            TypeTag::Bool => Self::Bool(
                json.as_bool()
                    .ok_or_else(|| wrong_shape(tag, "expected a boolean"))?,
            ),
            TypeTag::Int8 => Self::Int8(json_integer(tag, json)?),
            TypeTag::Int16 => Self::Int16(json_integer(tag, json)?),
            TypeTag::Int32 => Self::Int32(json_integer(tag, json)?),
            TypeTag::Int64 => Self::Int64(json_integer(tag, json)?),
            TypeTag::Uint8 => Self::Uint8(json_integer(tag, json)?),
            TypeTag::Uint16 => Self::Uint16(json_integer(tag, json)?),
            TypeTag::Uint32 => Self::Uint32(json_integer(tag, json)?),
            TypeTag::Uint64 => Self::Uint64(json_integer(tag, json)?),
            TypeTag::Varuint32 => Self::Varuint32(json_integer(tag, json)?),
            TypeTag::Name => Self::Name(json_str(tag, json)?.parse()?),
            TypeTag::String => Self::String(json_str(tag, json)?.to_string()),
            TypeTag::Bytes => Self::Bytes(hex::decode(json_str(tag, json)?)?),
            TypeTag::Asset => Self::Asset(json_str(tag, json)?.parse()?),
            TypeTag::Array(element) => {
                let items = json
                    .as_array()
                    .ok_or_else(|| wrong_shape(tag, "expected a list"))?;
                let values = items
                    .iter()
                    .map(|item| Self::from_json(element, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::Array(Array::new((**element).clone(), values)?)
            }
            TypeTag::Wasm => Self::Wasm(Wasm::from_hex(json_str(tag, json)?)?),
        })
    }
}

fn wrong_shape(tag: &TypeTag, reason: &str) -> CodecError {
    CodecError::InvalidJson {
        type_tag: tag.clone(),
        reason: reason.to_string(),
    }
}

fn json_str<'a>(tag: &TypeTag, json: &'a Value) -> Result<&'a str, CodecError> {
    json.as_str()
        .ok_or_else(|| wrong_shape(tag, "expected a string"))
}

/// Accepts JSON numbers and decimal strings (64-bit values are commonly
/// quoted), then narrows to the target width.
fn json_integer<T: TryFrom<i128>>(tag: &TypeTag, json: &Value) -> Result<T, CodecError> {
    let wide: i128 = match json {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .ok_or_else(|| wrong_shape(tag, "expected an integer"))?,
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| wrong_shape(tag, "expected an integer string"))?,
        _ => return Err(wrong_shape(tag, "expected an integer")),
    };
    T::try_from(wide).map_err(|_| CodecError::OutOfRange {
        type_tag: tag.clone(),
        value: wide.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for TypedValue {
                fn from(v: $native) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_native!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Name => Name,
    String => String,
    Vec<u8> => Bytes,
    Asset => Asset,
    Array => Array,
    Wasm => Wasm,
);

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixed_width_integers_are_little_endian() {
        assert_eq!(TypedValue::Int8(-1).to_hex(), "ff");
        assert_eq!(TypedValue::Int16(-2).to_hex(), "feff");
        assert_eq!(TypedValue::Uint16(0x1234).to_hex(), "3412");
        assert_eq!(TypedValue::Int32(1).to_hex(), "01000000");
        assert_eq!(TypedValue::Uint32(0xdeadbeef).to_hex(), "efbeadde");
        assert_eq!(TypedValue::Int64(-1).to_hex(), "ffffffffffffffff");
        assert_eq!(TypedValue::Uint64(256).to_hex(), "0001000000000000");
    }

    #[test]
    fn string_is_length_prefixed() {
        assert_eq!(TypedValue::from("hello").to_hex(), "0568656c6c6f");
        assert_eq!(TypedValue::from("").to_hex(), "00");
    }

    #[test]
    fn bytes_are_length_prefixed() {
        assert_eq!(TypedValue::Bytes(vec![0xca, 0xfe]).to_hex(), "02cafe");
    }

    #[test]
    fn long_string_uses_multibyte_prefix() {
        let s = "x".repeat(200);
        let encoded = TypedValue::from(s.as_str()).encode();
        assert_eq!(&encoded[..2], &[0xc8, 0x01]);
        assert_eq!(encoded.len(), 202);
    }

    #[test]
    fn array_of_names_matches_chain_encoding() {
        let names = ["youraccount1", "argentinaeos"]
            .iter()
            .map(|n| TypedValue::from(Name::new(n).unwrap()))
            .collect();
        let array = Array::new(TypeTag::Name, names).unwrap();
        assert_eq!(
            TypedValue::from(array).to_hex(),
            "0210f2d414217335f580a932d3e5a9d835"
        );
    }

    #[test]
    fn array_rejects_mixed_element_types() {
        let err = Array::new(
            TypeTag::Uint8,
            vec![TypedValue::Uint8(1), TypedValue::Uint16(2)],
        )
        .unwrap_err();
        match err {
            CodecError::ArrayTypeMismatch { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_tag_display_and_parse() {
        let tag = TypeTag::Array(Box::new(TypeTag::Array(Box::new(TypeTag::Name))));
        assert_eq!(tag.to_string(), "Array<Array<Name>>");
        assert_eq!("Array<Array<Name>>".parse::<TypeTag>().unwrap(), tag);
        assert!(matches!(
            "Float128".parse::<TypeTag>(),
            Err(CodecError::UnknownType(_))
        ));
    }

    #[test]
    fn type_tag_nesting_is_bounded() {
        let nested = |depth: usize| format!("{}Name{}", "Array<".repeat(depth), ">".repeat(depth));
        assert!(nested(MAX_ARRAY_NESTING).parse::<TypeTag>().is_ok());
        assert!(matches!(
            nested(MAX_ARRAY_NESTING + 1).parse::<TypeTag>(),
            Err(CodecError::NestingTooDeep { limit: MAX_ARRAY_NESTING, .. })
        ));
        assert!(matches!(
            nested(200_000).parse::<TypeTag>(),
            Err(CodecError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn from_hex_decodes_every_scalar_tag() {
        let samples = vec![
            TypedValue::Bool(true),
            TypedValue::Int8(-7),
            TypedValue::Int16(-300),
            TypedValue::Int32(70_000),
            TypedValue::Int64(i64::MIN),
            TypedValue::Uint8(200),
            TypedValue::Uint16(60_000),
            TypedValue::Uint32(4_000_000_000),
            TypedValue::Uint64(u64::MAX),
            TypedValue::Varuint32(u32::MAX),
            TypedValue::from(Name::new("eosio.token").unwrap()),
            TypedValue::from("memo"),
            TypedValue::Bytes(vec![1, 2, 3]),
            TypedValue::from("1.0000 EOS".parse::<Asset>().unwrap()),
            TypedValue::Wasm(Wasm::new(vec![0, 0x61, 0x73, 0x6d])),
        ];
        for value in samples {
            let decoded = TypedValue::from_hex(&value.type_tag(), &value.to_hex()).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn from_hex_rejects_trailing_bytes() {
        assert!(matches!(
            TypedValue::from_hex(&TypeTag::Uint8, "0102"),
            Err(CodecError::TrailingBytes(1))
        ));
    }

    #[test]
    fn bool_decode_rejects_other_bytes() {
        assert!(TypedValue::from_hex(&TypeTag::Bool, "02").is_err());
    }

    #[test]
    fn json_forms() {
        assert_eq!(TypedValue::Int8(10).to_json(), json!(10));
        assert_eq!(
            TypedValue::from(Name::new("user2").unwrap()).to_json(),
            json!("user2")
        );
        assert_eq!(TypedValue::Bytes(vec![0xab]).to_json(), json!("ab"));
    }

    #[test]
    fn from_json_enforces_ranges() {
        assert_eq!(
            TypedValue::from_json(&TypeTag::Int8, &json!(127)).unwrap(),
            TypedValue::Int8(127)
        );
        assert!(matches!(
            TypedValue::from_json(&TypeTag::Int8, &json!(128)),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            TypedValue::from_json(&TypeTag::Uint16, &json!(-1)),
            Err(CodecError::OutOfRange { .. })
        ));
        assert_eq!(
            TypedValue::from_json(&TypeTag::Uint64, &json!("18446744073709551615")).unwrap(),
            TypedValue::Uint64(u64::MAX)
        );
    }

    #[test]
    fn from_json_rejects_wrong_shape() {
        assert!(matches!(
            TypedValue::from_json(&TypeTag::Name, &json!(5)),
            Err(CodecError::InvalidJson { .. })
        ));
        assert!(TypedValue::from_json(&TypeTag::Name, &json!("NotAName")).is_err());
    }

    #[test]
    fn nested_array_json_roundtrip() {
        let tag: TypeTag = "Array<Uint16>".parse().unwrap();
        let value = TypedValue::from_json(&tag, &json!([1, 2, 65535])).unwrap();
        assert_eq!(value.to_hex(), "0301000200ffff");
        assert_eq!(value.to_json(), json!([1, 2, 65535]));
    }
}
