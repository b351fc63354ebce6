//! Discriminator-tagged account encoding

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::{AttestationError, AttestationResult};

/// An account owned by the attestation program
pub trait ProgramAccount: BorshSerialize + BorshDeserialize {
    /// Leading byte identifying the account type
    const DISCRIMINATOR: u8;
    /// Name used in errors and logs
    const NAME: &'static str;

    /// Decode account data, checking the discriminator.
    ///
    /// Bytes past the encoded fields are ignored, so accounts allocated with
    /// slack space still decode.
    fn from_bytes(data: &[u8]) -> AttestationResult<Self> {
        let (&discriminator, mut rest) = data
            .split_first()
            .ok_or(AttestationError::EmptyAccountData(Self::NAME))?;
        if discriminator != Self::DISCRIMINATOR {
            return Err(AttestationError::AccountDiscriminatorMismatch {
                account: Self::NAME,
                expected: Self::DISCRIMINATOR,
                actual: discriminator,
            });
        }
        Ok(Self::deserialize(&mut rest)?)
    }

    /// Encode the account exactly as the program stores it
    fn to_bytes(&self) -> AttestationResult<Vec<u8>> {
        let mut data = vec![Self::DISCRIMINATOR];
        self.serialize(&mut data)?;
        Ok(data)
    }
}
