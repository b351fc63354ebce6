//! Instruction builders and parsers for the attestation service program
//!
//! Every instruction payload is a single discriminator byte followed by the
//! borsh encoding of its arguments. Each sub-module exposes the same surface:
//! an accounts struct, an args struct, a builder that fills in default
//! accounts, and a positional parser.

pub mod change_authorized_signers;
pub mod change_schema_description;
pub mod change_schema_status;
pub mod change_schema_version;
pub mod close_attestation;
pub mod create_attestation;
pub mod create_credential;
pub mod create_request;
pub mod create_schema;

use borsh::{BorshDeserialize, BorshSerialize};
use log::debug;
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::constants::discriminators;
use crate::errors::{AttestationError, AttestationResult};

pub use self::change_authorized_signers::*;
pub use self::change_schema_description::*;
pub use self::change_schema_status::*;
pub use self::change_schema_version::*;
pub use self::close_attestation::*;
pub use self::create_attestation::*;
pub use self::create_credential::*;
pub use self::create_request::*;
pub use self::create_schema::*;

/// Static description of one account an instruction touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSpec {
    pub name: &'static str,
    pub is_writable: bool,
    pub is_signer: bool,
    /// Whether the builder can fill the account in on its own
    pub has_default: bool,
    pub docs: Option<&'static str>,
}

impl AccountSpec {
    /// Build the account meta for `pubkey` with this account's flags
    pub fn meta(&self, pubkey: Pubkey) -> AccountMeta {
        if self.is_writable {
            AccountMeta::new(pubkey, self.is_signer)
        } else {
            AccountMeta::new_readonly(pubkey, self.is_signer)
        }
    }
}

/// Static description of one instruction argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub ty: &'static str,
}

/// Static description of an instruction's wire interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSpec {
    pub name: &'static str,
    pub discriminator: u8,
    /// Accounts in the order the program reads them
    pub accounts: &'static [AccountSpec],
    pub args: &'static [ArgSpec],
    pub docs: Option<&'static str>,
}

/// Every instruction the program understands, ordered by discriminator
pub fn all_specs() -> [&'static InstructionSpec; 9] {
    [
        &create_credential::SPEC,
        &create_schema::SPEC,
        &change_schema_status::SPEC,
        &change_authorized_signers::SPEC,
        &change_schema_description::SPEC,
        &change_schema_version::SPEC,
        &create_attestation::SPEC,
        &close_attestation::SPEC,
        &create_request::SPEC,
    ]
}

/// Arguments of an instruction, tagged with the instruction's discriminator
pub trait InstructionArgs: BorshSerialize + BorshDeserialize {
    const DISCRIMINATOR: u8;

    /// Encode as instruction data. The discriminator is always this
    /// instruction's own, whatever the caller holds.
    fn pack(&self) -> AttestationResult<Vec<u8>> {
        let mut data = vec![Self::DISCRIMINATOR];
        self.serialize(&mut data)?;
        Ok(data)
    }

    /// Decode instruction data, checking the discriminator and rejecting
    /// trailing bytes
    fn unpack(data: &[u8]) -> AttestationResult<Self> {
        let (&discriminator, rest) = data
            .split_first()
            .ok_or(AttestationError::EmptyInstructionData)?;
        if discriminator != Self::DISCRIMINATOR {
            return Err(AttestationError::InvalidDiscriminator {
                expected: Self::DISCRIMINATOR,
                actual: discriminator,
            });
        }
        Ok(Self::try_from_slice(rest)?)
    }
}

/// Assemble an instruction from its account table, keys in table order,
/// and trailing remaining accounts
pub(crate) fn build_instruction<A: InstructionArgs>(
    spec: &InstructionSpec,
    program_id: Pubkey,
    keys: &[Pubkey],
    remaining_accounts: &[AccountMeta],
    args: &A,
) -> AttestationResult<Instruction> {
    debug_assert_eq!(spec.accounts.len(), keys.len());

    let mut accounts: Vec<AccountMeta> = spec
        .accounts
        .iter()
        .zip(keys)
        .map(|(account, key)| account.meta(*key))
        .collect();
    accounts.extend_from_slice(remaining_accounts);

    let data = args.pack()?;
    debug!(
        "Built {} instruction ({} accounts, {} data bytes)",
        spec.name,
        accounts.len(),
        data.len()
    );

    Ok(Instruction {
        program_id,
        accounts,
        data,
    })
}

/// Hands out account metas in order after checking there are enough of them
pub(crate) struct AccountCursor<'a> {
    metas: &'a [AccountMeta],
    index: usize,
}

impl<'a> AccountCursor<'a> {
    pub(crate) fn new(spec: &InstructionSpec, metas: &'a [AccountMeta]) -> AttestationResult<Self> {
        let expected = spec.accounts.len();
        if metas.len() < expected {
            return Err(AttestationError::NotEnoughAccounts {
                expected,
                actual: metas.len(),
            });
        }
        Ok(Self { metas, index: 0 })
    }

    pub(crate) fn next_account(&mut self) -> AccountMeta {
        let meta = self.metas[self.index].clone();
        self.index += 1;
        meta
    }

    pub(crate) fn remaining(self) -> Vec<AccountMeta> {
        self.metas[self.index..].to_vec()
    }
}

/// Any attestation service instruction, decoded
#[derive(Debug, Clone, PartialEq)]
pub enum AttestationInstruction {
    CreateCredential(ParsedCreateCredential),
    CreateSchema(ParsedCreateSchema),
    ChangeSchemaStatus(ParsedChangeSchemaStatus),
    ChangeAuthorizedSigners(ParsedChangeAuthorizedSigners),
    ChangeSchemaDescription(ParsedChangeSchemaDescription),
    ChangeSchemaVersion(ParsedChangeSchemaVersion),
    CreateAttestation(ParsedCreateAttestation),
    CloseAttestation(ParsedCloseAttestation),
    CreateRequest(ParsedCreateRequest),
}

impl AttestationInstruction {
    /// Decode an instruction addressed to `program_id`
    pub fn unpack(instruction: &Instruction, program_id: &Pubkey) -> AttestationResult<Self> {
        if instruction.program_id != *program_id {
            return Err(AttestationError::ProgramMismatch {
                expected: *program_id,
                actual: instruction.program_id,
            });
        }

        let discriminator = *instruction
            .data
            .first()
            .ok_or(AttestationError::EmptyInstructionData)?;

        let parsed = match discriminator {
            discriminators::CREATE_CREDENTIAL => {
                Self::CreateCredential(parse_create_credential(instruction)?)
            }
            discriminators::CREATE_SCHEMA => Self::CreateSchema(parse_create_schema(instruction)?),
            discriminators::CHANGE_SCHEMA_STATUS => {
                Self::ChangeSchemaStatus(parse_change_schema_status(instruction)?)
            }
            discriminators::CHANGE_AUTHORIZED_SIGNERS => {
                Self::ChangeAuthorizedSigners(parse_change_authorized_signers(instruction)?)
            }
            discriminators::CHANGE_SCHEMA_DESCRIPTION => {
                Self::ChangeSchemaDescription(parse_change_schema_description(instruction)?)
            }
            discriminators::CHANGE_SCHEMA_VERSION => {
                Self::ChangeSchemaVersion(parse_change_schema_version(instruction)?)
            }
            discriminators::CREATE_ATTESTATION => {
                Self::CreateAttestation(parse_create_attestation(instruction)?)
            }
            discriminators::CLOSE_ATTESTATION => {
                Self::CloseAttestation(parse_close_attestation(instruction)?)
            }
            discriminators::CREATE_REQUEST => Self::CreateRequest(parse_create_request(instruction)?),
            other => return Err(AttestationError::UnknownDiscriminator(other)),
        };
        Ok(parsed)
    }

    /// Name of the decoded instruction
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCredential(_) => create_credential::SPEC.name,
            Self::CreateSchema(_) => create_schema::SPEC.name,
            Self::ChangeSchemaStatus(_) => change_schema_status::SPEC.name,
            Self::ChangeAuthorizedSigners(_) => change_authorized_signers::SPEC.name,
            Self::ChangeSchemaDescription(_) => change_schema_description::SPEC.name,
            Self::ChangeSchemaVersion(_) => change_schema_version::SPEC.name,
            Self::CreateAttestation(_) => create_attestation::SPEC.name,
            Self::CloseAttestation(_) => close_attestation::SPEC.name,
            Self::CreateRequest(_) => create_request::SPEC.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ATTESTATION_PROGRAM_ID;

    #[test]
    fn test_specs_ordered_by_discriminator() {
        for (index, spec) in all_specs().iter().enumerate() {
            assert_eq!(spec.discriminator as usize, index, "{}", spec.name);
        }
    }

    #[test]
    fn test_spec_discriminators_match_args() {
        assert_eq!(create_credential::SPEC.discriminator, CreateCredentialArgs::DISCRIMINATOR);
        assert_eq!(create_schema::SPEC.discriminator, CreateSchemaArgs::DISCRIMINATOR);
        assert_eq!(change_schema_status::SPEC.discriminator, ChangeSchemaStatusArgs::DISCRIMINATOR);
        assert_eq!(
            change_authorized_signers::SPEC.discriminator,
            ChangeAuthorizedSignersArgs::DISCRIMINATOR
        );
        assert_eq!(
            change_schema_description::SPEC.discriminator,
            ChangeSchemaDescriptionArgs::DISCRIMINATOR
        );
        assert_eq!(change_schema_version::SPEC.discriminator, ChangeSchemaVersionArgs::DISCRIMINATOR);
        assert_eq!(create_attestation::SPEC.discriminator, CreateAttestationArgs::DISCRIMINATOR);
        assert_eq!(close_attestation::SPEC.discriminator, CloseAttestationArgs::DISCRIMINATOR);
        assert_eq!(create_request::SPEC.discriminator, CreateRequestArgs::DISCRIMINATOR);
    }

    #[test]
    fn test_account_spec_meta_flags() {
        let key = Pubkey::new_unique();
        let writable_signer = AccountSpec {
            name: "payer",
            is_writable: true,
            is_signer: true,
            has_default: false,
            docs: None,
        };
        let readonly = AccountSpec {
            name: "credential",
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: None,
        };

        assert_eq!(writable_signer.meta(key), AccountMeta::new(key, true));
        assert_eq!(readonly.meta(key), AccountMeta::new_readonly(key, false));
    }

    #[test]
    fn test_unpack_rejects_empty_data() {
        let instruction = Instruction {
            program_id: ATTESTATION_PROGRAM_ID,
            accounts: vec![],
            data: vec![],
        };
        let err = AttestationInstruction::unpack(&instruction, &ATTESTATION_PROGRAM_ID).unwrap_err();
        assert!(matches!(err, AttestationError::EmptyInstructionData));
    }

    #[test]
    fn test_unpack_rejects_unknown_discriminator() {
        let instruction = Instruction {
            program_id: ATTESTATION_PROGRAM_ID,
            accounts: vec![],
            data: vec![42],
        };
        let err = AttestationInstruction::unpack(&instruction, &ATTESTATION_PROGRAM_ID).unwrap_err();
        assert!(matches!(err, AttestationError::UnknownDiscriminator(42)));
    }

    #[test]
    fn test_unpack_rejects_other_program() {
        let instruction = Instruction {
            program_id: Pubkey::new_unique(),
            accounts: vec![],
            data: vec![4],
        };
        let err = AttestationInstruction::unpack(&instruction, &ATTESTATION_PROGRAM_ID).unwrap_err();
        assert!(matches!(err, AttestationError::ProgramMismatch { .. }));
    }

    #[test]
    fn test_unpack_dispatches_by_discriminator() {
        let instruction = ChangeSchemaStatusBuilder::new()
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .is_paused(true)
            .instruction()
            .unwrap();

        let decoded = AttestationInstruction::unpack(&instruction, &ATTESTATION_PROGRAM_ID).unwrap();
        assert_eq!(decoded.name(), "changeSchemaStatus");
        match decoded {
            AttestationInstruction::ChangeSchemaStatus(parsed) => assert!(parsed.data.is_paused),
            other => panic!("unexpected instruction: {:?}", other),
        }
    }
}
