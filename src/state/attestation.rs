//! Attestation account

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::ProgramAccount;
use crate::constants::discriminators::ATTESTATION_ACCOUNT;

/// A signed statement about a subject, shaped by a schema
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attestation {
    pub nonce: Pubkey,
    pub credential: Pubkey,
    pub schema: Pubkey,
    /// Borsh-encoded values following the schema layout
    pub data: Vec<u8>,
    pub signer: Pubkey,
    /// Unix timestamp; zero never expires
    pub expiry: i64,
}

impl ProgramAccount for Attestation {
    const DISCRIMINATOR: u8 = ATTESTATION_ACCOUNT;
    const NAME: &'static str = "attestation";
}

impl Attestation {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiry != 0 && now >= self.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::offsets;

    fn attestation(expiry: i64) -> Attestation {
        Attestation {
            nonce: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            data: vec![1, 2, 3],
            signer: Pubkey::new_unique(),
            expiry,
        }
    }

    #[test]
    fn test_filter_offsets() {
        let attestation = attestation(0);
        let bytes = attestation.to_bytes().unwrap();

        let credential = offsets::ATTESTATION_CREDENTIAL;
        let schema = offsets::ATTESTATION_SCHEMA;
        assert_eq!(bytes[offsets::DISCRIMINATOR], 2);
        assert_eq!(&bytes[credential..credential + 32], attestation.credential.as_ref());
        assert_eq!(&bytes[schema..schema + 32], attestation.schema.as_ref());
    }

    #[test]
    fn test_expiry() {
        assert!(!attestation(0).is_expired(i64::MAX));
        assert!(!attestation(100).is_expired(99));
        assert!(attestation(100).is_expired(100));
    }

    #[test]
    fn test_ignores_trailing_bytes() {
        let attestation = attestation(5);
        let mut bytes = attestation.to_bytes().unwrap();
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(Attestation::from_bytes(&bytes).unwrap(), attestation);
    }

    #[test]
    fn test_truncated_data_fails() {
        let bytes = attestation(5).to_bytes().unwrap();
        assert!(Attestation::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
