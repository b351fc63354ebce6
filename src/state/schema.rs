//! Schema account

use std::borrow::Cow;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::layout::{decode_attestation_data, encode_attestation_data, SchemaDataType, SchemaValue};
use super::ProgramAccount;
use crate::constants::discriminators::SCHEMA_ACCOUNT;
use crate::errors::{AttestationError, AttestationResult};

/// Describes the shape of attestation data issued under a credential
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    pub name: Vec<u8>,
    pub description: Vec<u8>,
    /// One type code per field, see [`SchemaDataType`]
    pub layout: Vec<u8>,
    /// Borsh-encoded field names without the outer vector length
    pub field_names: Vec<u8>,
    pub is_paused: bool,
    pub version: u8,
}

impl ProgramAccount for Schema {
    const DISCRIMINATOR: u8 = SCHEMA_ACCOUNT;
    const NAME: &'static str = "schema";
}

impl Schema {
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn description(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.description)
    }

    /// Decode the stored field names. The program keeps one name per layout
    /// entry and drops the vector length, so it is rebuilt from the layout.
    pub fn field_names(&self) -> AttestationResult<Vec<String>> {
        let count = self.layout.len() as u32;
        let mut bytes = Vec::with_capacity(4 + self.field_names.len());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.extend_from_slice(&self.field_names);
        Ok(Vec::<String>::try_from_slice(&bytes)?)
    }

    pub fn data_types(&self) -> AttestationResult<Vec<SchemaDataType>> {
        self.layout.iter().map(|code| SchemaDataType::try_from(*code)).collect()
    }

    /// Decode attestation data issued against this schema
    pub fn decode_data(&self, data: &[u8]) -> AttestationResult<Vec<SchemaValue>> {
        decode_attestation_data(&self.layout, data)
    }

    /// Encode attestation data from `(field name, text value)` pairs.
    ///
    /// Every schema field must be given exactly once; order does not matter.
    pub fn encode_named_values(&self, values: &[(&str, &str)]) -> AttestationResult<Vec<u8>> {
        let names = self.field_names()?;
        if let Some((unknown, _)) = values.iter().find(|(name, _)| !names.iter().any(|n| n == name)) {
            return Err(AttestationError::SchemaData(format!("schema has no field {:?}", unknown)));
        }

        let mut parsed = Vec::with_capacity(names.len());
        for (name, ty) in names.iter().zip(self.data_types()?) {
            let mut matches = values.iter().filter(|(field, _)| field == name);
            let text = match (matches.next(), matches.next()) {
                (Some((_, text)), None) => *text,
                (None, _) => {
                    return Err(AttestationError::SchemaData(format!("missing value for {:?}", name)))
                }
                (Some(_), Some(_)) => {
                    return Err(AttestationError::SchemaData(format!("duplicate value for {:?}", name)))
                }
            };
            parsed.push(SchemaValue::parse(ty, text)?);
        }

        encode_attestation_data(&self.layout, &parsed)
    }
}

/// Encode field names the way the program stores them on a schema
pub fn encode_field_names(names: &[String]) -> AttestationResult<Vec<u8>> {
    let mut bytes = borsh::to_vec(names)?;
    bytes.drain(..4);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        let names = vec!["name".to_string(), "location".to_string()];
        Schema {
            credential: Pubkey::new_unique(),
            name: b"test_data".to_vec(),
            description: b"schema for test data".to_vec(),
            layout: vec![12, 0],
            field_names: encode_field_names(&names).unwrap(),
            is_paused: false,
            version: 1,
        }
    }

    #[test]
    fn test_field_names() {
        let schema = schema();
        assert_eq!(schema.field_names().unwrap(), vec!["name", "location"]);
        assert_eq!(&schema.field_names[..4], &[4, 0, 0, 0]);
    }

    #[test]
    fn test_field_names_mismatch_with_layout() {
        let mut schema = schema();
        schema.layout.push(10);
        assert!(schema.field_names().is_err());
    }

    #[test]
    fn test_credential_offset() {
        let schema = schema();
        let bytes = schema.to_bytes().unwrap();
        assert_eq!(&bytes[1..33], schema.credential.as_ref());
        assert_eq!(Schema::from_bytes(&bytes).unwrap(), schema);
    }

    #[test]
    fn test_data_types() {
        assert_eq!(
            schema().data_types().unwrap(),
            vec![SchemaDataType::String, SchemaDataType::U8]
        );
    }

    #[test]
    fn test_encode_named_values() {
        let schema = schema();
        let data = schema
            .encode_named_values(&[("location", "3"), ("name", "berlin")])
            .unwrap();
        assert_eq!(data, borsh::to_vec(&("berlin".to_string(), 3u8)).unwrap());

        assert!(schema.encode_named_values(&[("name", "berlin")]).is_err());
        assert!(schema
            .encode_named_values(&[("name", "a"), ("location", "1"), ("extra", "x")])
            .is_err());
        assert!(schema
            .encode_named_values(&[("name", "a"), ("name", "b"), ("location", "1")])
            .is_err());
    }

    #[test]
    fn test_decode_data() {
        let data = borsh::to_vec(&("berlin".to_string(), 3u8)).unwrap();
        let values = schema().decode_data(&data).unwrap();
        assert_eq!(
            values,
            vec![SchemaValue::String("berlin".to_string()), SchemaValue::U8(3)]
        );
    }
}
