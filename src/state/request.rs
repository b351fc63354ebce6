//! Request account

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::ProgramAccount;
use crate::constants::discriminators::REQUEST_ACCOUNT;

/// A pending ask for a credential's signers to attest some data
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub nonce: Pubkey,
    pub credential: Pubkey,
    pub schema: Pubkey,
    /// Borsh-encoded values following the schema layout
    pub data: Vec<u8>,
    pub signer: Pubkey,
    /// Unix timestamp; zero never expires
    pub expiry: i64,
}

impl ProgramAccount for Request {
    const DISCRIMINATOR: u8 = REQUEST_ACCOUNT;
    const NAME: &'static str = "request";
}

impl Request {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiry != 0 && now >= self.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attestation;

    #[test]
    fn test_size_matches_program_allocation() {
        let request = Request {
            nonce: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            data: vec![0; 10],
            signer: Pubkey::new_unique(),
            expiry: 0,
        };
        let bytes = request.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 32 + 32 + 32 + (4 + 10) + 32 + 8);
        assert_eq!(bytes[0], 3);
    }

    #[test]
    fn test_not_an_attestation() {
        let request = Request {
            nonce: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            data: vec![],
            signer: Pubkey::new_unique(),
            expiry: 0,
        };
        let bytes = request.to_bytes().unwrap();
        assert!(Attestation::from_bytes(&bytes).is_err());
    }
}
