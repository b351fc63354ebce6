//! Credential account

use std::borrow::Cow;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::ProgramAccount;
use crate::constants::discriminators::CREDENTIAL_ACCOUNT;

/// An issuer identity. Schemas hang off a credential, and only its
/// authorized signers may attest against them.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub authority: Pubkey,
    pub name: Vec<u8>,
    pub authorized_signers: Vec<Pubkey>,
}

impl ProgramAccount for Credential {
    const DISCRIMINATOR: u8 = CREDENTIAL_ACCOUNT;
    const NAME: &'static str = "credential";
}

impl Credential {
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn is_authorized_signer(&self, signer: &Pubkey) -> bool {
        self.authorized_signers.contains(signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AttestationError;

    fn credential() -> Credential {
        Credential {
            authority: Pubkey::new_unique(),
            name: b"test".to_vec(),
            authorized_signers: vec![Pubkey::new_unique()],
        }
    }

    #[test]
    fn test_layout() {
        let credential = credential();
        let bytes = credential.to_bytes().unwrap();

        assert_eq!(bytes[0], 0);
        assert_eq!(&bytes[1..33], credential.authority.as_ref());
        assert_eq!(&bytes[33..37], &[4, 0, 0, 0]);
        assert_eq!(&bytes[37..41], b"test");
        assert_eq!(bytes.len(), 1 + 32 + 4 + 4 + 4 + 32);
        assert_eq!(Credential::from_bytes(&bytes).unwrap(), credential);
    }

    #[test]
    fn test_authorized_signer() {
        let credential = credential();
        assert!(credential.is_authorized_signer(&credential.authorized_signers[0]));
        assert!(!credential.is_authorized_signer(&credential.authority));
        assert_eq!(credential.name(), "test");
    }

    #[test]
    fn test_rejects_other_discriminator() {
        let mut bytes = credential().to_bytes().unwrap();
        bytes[0] = 1;
        assert!(matches!(
            Credential::from_bytes(&bytes),
            Err(AttestationError::AccountDiscriminatorMismatch { expected: 0, actual: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_data() {
        assert!(matches!(
            Credential::from_bytes(&[]),
            Err(AttestationError::EmptyAccountData("credential"))
        ));
    }
}
