//! Schema layouts and attestation data
//!
//! A schema's layout is a list of type codes, one per field. Attestation
//! data is the borsh encoding of the field values in layout order, so it can
//! be decoded without knowing the Rust type that produced it.
//!
//! `char` has no borsh encoding of its own; it travels as its `u32` scalar
//! value.

use std::fmt;
use std::str::FromStr;

use borsh::BorshDeserialize;
use serde::Serialize;

use crate::errors::{AttestationError, AttestationResult};

/// Type code of one schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchemaDataType {
    U8 = 0,
    U16 = 1,
    U32 = 2,
    U64 = 3,
    U128 = 4,
    I8 = 5,
    I16 = 6,
    I32 = 7,
    I64 = 8,
    I128 = 9,
    Bool = 10,
    Char = 11,
    String = 12,
    VecU8 = 13,
    VecU16 = 14,
    VecU32 = 15,
    VecU64 = 16,
    VecU128 = 17,
    VecI8 = 18,
    VecI16 = 19,
    VecI32 = 20,
    VecI64 = 21,
    VecI128 = 22,
    VecBool = 23,
    VecChar = 24,
    VecString = 25,
}

const VEC_OFFSET: u8 = SchemaDataType::VecU8 as u8 - SchemaDataType::U8 as u8;

impl TryFrom<u8> for SchemaDataType {
    type Error = AttestationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        use SchemaDataType::*;
        let ty = match code {
            0 => U8,
            1 => U16,
            2 => U32,
            3 => U64,
            4 => U128,
            5 => I8,
            6 => I16,
            7 => I32,
            8 => I64,
            9 => I128,
            10 => Bool,
            11 => Char,
            12 => String,
            13 => VecU8,
            14 => VecU16,
            15 => VecU32,
            16 => VecU64,
            17 => VecU128,
            18 => VecI8,
            19 => VecI16,
            20 => VecI32,
            21 => VecI64,
            22 => VecI128,
            23 => VecBool,
            24 => VecChar,
            25 => VecString,
            other => return Err(AttestationError::UnknownLayoutType(other)),
        };
        Ok(ty)
    }
}

impl SchemaDataType {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Element type of a vector type, `None` for scalars
    pub fn element(self) -> Option<SchemaDataType> {
        let code = self as u8;
        if code >= SchemaDataType::VecU8 as u8 {
            SchemaDataType::try_from(code - VEC_OFFSET).ok()
        } else {
            None
        }
    }

    /// Vector type holding elements of this type, `None` for vectors
    pub fn vec_of(self) -> Option<SchemaDataType> {
        if self.element().is_some() {
            return None;
        }
        SchemaDataType::try_from(self as u8 + VEC_OFFSET).ok()
    }

    pub fn name(self) -> &'static str {
        use SchemaDataType::*;
        match self {
            U8 => "u8",
            U16 => "u16",
            U32 => "u32",
            U64 => "u64",
            U128 => "u128",
            I8 => "i8",
            I16 => "i16",
            I32 => "i32",
            I64 => "i64",
            I128 => "i128",
            Bool => "bool",
            Char => "char",
            String => "string",
            VecU8 => "vec<u8>",
            VecU16 => "vec<u16>",
            VecU32 => "vec<u32>",
            VecU64 => "vec<u64>",
            VecU128 => "vec<u128>",
            VecI8 => "vec<i8>",
            VecI16 => "vec<i16>",
            VecI32 => "vec<i32>",
            VecI64 => "vec<i64>",
            VecI128 => "vec<i128>",
            VecBool => "vec<bool>",
            VecChar => "vec<char>",
            VecString => "vec<string>",
        }
    }
}

impl FromStr for SchemaDataType {
    type Err = AttestationError;

    /// Parse a type name such as `u32`, `string` or `vec<bool>`
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim().to_ascii_lowercase();
        (0..=SchemaDataType::VecString as u8)
            .filter_map(|code| SchemaDataType::try_from(code).ok())
            .find(|ty| ty.name() == name)
            .ok_or_else(|| AttestationError::SchemaData(format!("unknown field type {:?}", name)))
    }
}

impl fmt::Display for SchemaDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded attestation field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Bool(bool),
    Char(char),
    String(String),
    Vec(Vec<SchemaValue>),
}

fn parse_scalar<T: FromStr>(ty: SchemaDataType, text: &str) -> AttestationResult<T> {
    text.trim()
        .parse()
        .map_err(|_| AttestationError::SchemaData(format!("cannot parse {:?} as {}", text, ty)))
}

impl SchemaValue {
    /// Parse a value of type `ty` from text. Vector elements are
    /// comma-separated; an empty string is an empty vector.
    pub fn parse(ty: SchemaDataType, text: &str) -> AttestationResult<Self> {
        use SchemaDataType as T;

        if let Some(element) = ty.element() {
            if text.trim().is_empty() {
                return Ok(SchemaValue::Vec(Vec::new()));
            }
            let items = text
                .split(',')
                .map(|item| SchemaValue::parse(element, item))
                .collect::<AttestationResult<Vec<_>>>()?;
            return Ok(SchemaValue::Vec(items));
        }

        let value = match ty {
            T::U8 => SchemaValue::U8(parse_scalar(ty, text)?),
            T::U16 => SchemaValue::U16(parse_scalar(ty, text)?),
            T::U32 => SchemaValue::U32(parse_scalar(ty, text)?),
            T::U64 => SchemaValue::U64(parse_scalar(ty, text)?),
            T::U128 => SchemaValue::U128(parse_scalar(ty, text)?),
            T::I8 => SchemaValue::I8(parse_scalar(ty, text)?),
            T::I16 => SchemaValue::I16(parse_scalar(ty, text)?),
            T::I32 => SchemaValue::I32(parse_scalar(ty, text)?),
            T::I64 => SchemaValue::I64(parse_scalar(ty, text)?),
            T::I128 => SchemaValue::I128(parse_scalar(ty, text)?),
            T::Bool => SchemaValue::Bool(parse_scalar(ty, text)?),
            T::Char => SchemaValue::Char(parse_scalar(ty, text)?),
            // strings are taken verbatim, whitespace included
            T::String => SchemaValue::String(text.to_string()),
            _ => return Err(AttestationError::UnknownLayoutType(ty.code())),
        };
        Ok(value)
    }

    /// Whether this value can be stored in a field of type `ty`
    pub fn matches(&self, ty: SchemaDataType) -> bool {
        use SchemaDataType as T;
        match (self, ty) {
            (SchemaValue::Vec(items), ty) => match ty.element() {
                Some(element) => items.iter().all(|item| item.matches(element)),
                None => false,
            },
            (SchemaValue::U8(_), T::U8)
            | (SchemaValue::U16(_), T::U16)
            | (SchemaValue::U32(_), T::U32)
            | (SchemaValue::U64(_), T::U64)
            | (SchemaValue::U128(_), T::U128)
            | (SchemaValue::I8(_), T::I8)
            | (SchemaValue::I16(_), T::I16)
            | (SchemaValue::I32(_), T::I32)
            | (SchemaValue::I64(_), T::I64)
            | (SchemaValue::I128(_), T::I128)
            | (SchemaValue::Bool(_), T::Bool)
            | (SchemaValue::Char(_), T::Char)
            | (SchemaValue::String(_), T::String) => true,
            _ => false,
        }
    }

    fn write(&self, out: &mut Vec<u8>) -> AttestationResult<()> {
        match self {
            SchemaValue::U8(v) => out.push(*v),
            SchemaValue::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::U128(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::I64(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::I128(v) => out.extend_from_slice(&v.to_le_bytes()),
            SchemaValue::Bool(v) => out.push(u8::from(*v)),
            SchemaValue::Char(v) => out.extend_from_slice(&u32::from(*v).to_le_bytes()),
            SchemaValue::String(v) => {
                write_len(v.len(), out)?;
                out.extend_from_slice(v.as_bytes());
            }
            SchemaValue::Vec(items) => {
                write_len(items.len(), out)?;
                for item in items {
                    item.write(out)?;
                }
            }
        }
        Ok(())
    }

    fn read(ty: SchemaDataType, buf: &mut &[u8]) -> AttestationResult<Self> {
        use SchemaDataType as T;

        if let Some(element) = ty.element() {
            let len = u32::deserialize(buf)?;
            // grow as elements decode; a bogus length runs out of input first
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(SchemaValue::read(element, buf)?);
            }
            return Ok(SchemaValue::Vec(items));
        }

        let value = match ty {
            T::U8 => SchemaValue::U8(u8::deserialize(buf)?),
            T::U16 => SchemaValue::U16(u16::deserialize(buf)?),
            T::U32 => SchemaValue::U32(u32::deserialize(buf)?),
            T::U64 => SchemaValue::U64(u64::deserialize(buf)?),
            T::U128 => SchemaValue::U128(u128::deserialize(buf)?),
            T::I8 => SchemaValue::I8(i8::deserialize(buf)?),
            T::I16 => SchemaValue::I16(i16::deserialize(buf)?),
            T::I32 => SchemaValue::I32(i32::deserialize(buf)?),
            T::I64 => SchemaValue::I64(i64::deserialize(buf)?),
            T::I128 => SchemaValue::I128(i128::deserialize(buf)?),
            T::Bool => SchemaValue::Bool(bool::deserialize(buf)?),
            T::Char => {
                let scalar = u32::deserialize(buf)?;
                let c = char::from_u32(scalar).ok_or_else(|| {
                    AttestationError::SchemaData(format!("invalid char scalar {:#x}", scalar))
                })?;
                SchemaValue::Char(c)
            }
            T::String => SchemaValue::String(String::deserialize(buf)?),
            _ => return Err(AttestationError::UnknownLayoutType(ty.code())),
        };
        Ok(value)
    }
}

fn write_len(len: usize, out: &mut Vec<u8>) -> AttestationResult<()> {
    let len = u32::try_from(len)
        .map_err(|_| AttestationError::SchemaData(format!("length {} exceeds u32", len)))?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

/// Decode attestation data against a schema layout
pub fn decode_attestation_data(layout: &[u8], data: &[u8]) -> AttestationResult<Vec<SchemaValue>> {
    let mut buf = data;
    let mut values = Vec::with_capacity(layout.len());
    for code in layout {
        let ty = SchemaDataType::try_from(*code)?;
        values.push(SchemaValue::read(ty, &mut buf)?);
    }
    if !buf.is_empty() {
        return Err(AttestationError::SchemaData(format!(
            "{} trailing bytes after the last field",
            buf.len()
        )));
    }
    Ok(values)
}

/// Encode field values as attestation data for a schema layout
pub fn encode_attestation_data(layout: &[u8], values: &[SchemaValue]) -> AttestationResult<Vec<u8>> {
    if layout.len() != values.len() {
        return Err(AttestationError::SchemaData(format!(
            "layout has {} fields, got {} values",
            layout.len(),
            values.len()
        )));
    }

    let mut out = Vec::new();
    for (index, (code, value)) in layout.iter().zip(values).enumerate() {
        let ty = SchemaDataType::try_from(*code)?;
        if !value.matches(ty) {
            return Err(AttestationError::SchemaData(format!(
                "field {} expects {}, got {:?}",
                index, ty, value
            )));
        }
        value.write(&mut out)?;
    }
    Ok(out)
}

/// A Rust type with a schema type code
pub trait SchemaField {
    const DATA_TYPE: SchemaDataType;
}

macro_rules! impl_schema_field {
    ($($ty:ty => $scalar:ident, $vec:ident;)*) => {
        $(
            impl SchemaField for $ty {
                const DATA_TYPE: SchemaDataType = SchemaDataType::$scalar;
            }

            impl SchemaField for Vec<$ty> {
                const DATA_TYPE: SchemaDataType = SchemaDataType::$vec;
            }
        )*
    };
}

impl_schema_field! {
    u8 => U8, VecU8;
    u16 => U16, VecU16;
    u32 => U32, VecU32;
    u64 => U64, VecU64;
    u128 => U128, VecU128;
    i8 => I8, VecI8;
    i16 => I16, VecI16;
    i32 => I32, VecI32;
    i64 => I64, VecI64;
    i128 => I128, VecI128;
    bool => Bool, VecBool;
    char => Char, VecChar;
    String => String, VecString;
}

/// A Rust struct whose borsh encoding is attestation data for a schema
pub trait SchemaStruct {
    /// Field names in declaration order
    fn field_names() -> Vec<String>;

    /// Type codes in declaration order
    fn schema_layout() -> Vec<u8>;
}

/// Implement [`SchemaStruct`] for a struct by listing its fields in order.
///
/// ```
/// use solana_attestation_client::schema_struct;
/// use solana_attestation_client::state::SchemaStruct;
///
/// struct TestData {
///     name: String,
///     location: u8,
/// }
///
/// schema_struct!(TestData { name: String, location: u8 });
///
/// assert_eq!(TestData::schema_layout(), vec![12, 0]);
/// ```
#[macro_export]
macro_rules! schema_struct {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl $crate::state::SchemaStruct for $name {
            fn field_names() -> Vec<String> {
                vec![$(stringify!($field).to_string()),*]
            }

            fn schema_layout() -> Vec<u8> {
                vec![$(<$ty as $crate::state::SchemaField>::DATA_TYPE.code()),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::BorshSerialize;

    #[derive(BorshSerialize)]
    struct Jurisdiction {
        recipient: String,
        jurisdiction: String,
        age: u32,
        tags: Vec<String>,
    }

    crate::schema_struct!(Jurisdiction {
        recipient: String,
        jurisdiction: String,
        age: u32,
        tags: Vec<String>,
    });

    #[test]
    fn test_every_code_roundtrips() {
        for code in 0..=25u8 {
            let ty = SchemaDataType::try_from(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert!(matches!(
            SchemaDataType::try_from(26),
            Err(AttestationError::UnknownLayoutType(26))
        ));
    }

    #[test]
    fn test_vector_element_types() {
        assert_eq!(SchemaDataType::VecString.element(), Some(SchemaDataType::String));
        assert_eq!(SchemaDataType::VecU8.element(), Some(SchemaDataType::U8));
        assert_eq!(SchemaDataType::U8.element(), None);
        assert_eq!(SchemaDataType::Bool.vec_of(), Some(SchemaDataType::VecBool));
        assert_eq!(SchemaDataType::VecBool.vec_of(), None);
    }

    #[test]
    fn test_schema_struct_layout() {
        assert_eq!(Jurisdiction::schema_layout(), vec![12, 12, 2, 25]);
        assert_eq!(
            Jurisdiction::field_names(),
            vec!["recipient", "jurisdiction", "age", "tags"]
        );
    }

    #[test]
    fn test_decode_matches_borsh_struct() {
        let value = Jurisdiction {
            recipient: "alice".to_string(),
            jurisdiction: "de".to_string(),
            age: 30,
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let data = borsh::to_vec(&value).unwrap();

        let decoded = decode_attestation_data(&Jurisdiction::schema_layout(), &data).unwrap();
        assert_eq!(
            decoded,
            vec![
                SchemaValue::String("alice".to_string()),
                SchemaValue::String("de".to_string()),
                SchemaValue::U32(30),
                SchemaValue::Vec(vec![
                    SchemaValue::String("a".to_string()),
                    SchemaValue::String("b".to_string()),
                ]),
            ]
        );
        assert_eq!(
            encode_attestation_data(&Jurisdiction::schema_layout(), &decoded).unwrap(),
            data
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let err = decode_attestation_data(&[0], &[1, 2]).unwrap_err();
        assert!(matches!(err, AttestationError::SchemaData(_)));
    }

    #[test]
    fn test_decode_rejects_short_data() {
        assert!(decode_attestation_data(&[3], &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_vector_length() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 1];
        assert!(decode_attestation_data(&[13], &data).is_err());
    }

    #[test]
    fn test_char_travels_as_u32() {
        let data = encode_attestation_data(&[11], &[SchemaValue::Char('A')]).unwrap();
        assert_eq!(data, vec![65, 0, 0, 0]);
        assert!(decode_attestation_data(&[11], &[0x00, 0xD8, 0, 0]).is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(SchemaValue::parse(SchemaDataType::U16, " 42 ").unwrap(), SchemaValue::U16(42));
        assert_eq!(SchemaValue::parse(SchemaDataType::Bool, "true").unwrap(), SchemaValue::Bool(true));
        assert_eq!(
            SchemaValue::parse(SchemaDataType::VecI8, "-1, 2").unwrap(),
            SchemaValue::Vec(vec![SchemaValue::I8(-1), SchemaValue::I8(2)])
        );
        assert_eq!(SchemaValue::parse(SchemaDataType::VecU8, "").unwrap(), SchemaValue::Vec(vec![]));
        assert!(SchemaValue::parse(SchemaDataType::U8, "256").is_err());
    }

    #[test]
    fn test_type_names() {
        assert_eq!("u32".parse::<SchemaDataType>().unwrap(), SchemaDataType::U32);
        assert_eq!("Vec<String>".parse::<SchemaDataType>().unwrap(), SchemaDataType::VecString);
        assert!("pubkey".parse::<SchemaDataType>().is_err());
    }

    #[test]
    fn test_encode_rejects_type_mismatch() {
        let err = encode_attestation_data(&[0], &[SchemaValue::Bool(true)]).unwrap_err();
        assert!(matches!(err, AttestationError::SchemaData(_)));

        let err = encode_attestation_data(&[0, 0], &[SchemaValue::U8(1)]).unwrap_err();
        assert!(matches!(err, AttestationError::SchemaData(_)));
    }
}
