//! `ChangeSchemaStatus` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CHANGE_SCHEMA_STATUS_DISCRIMINATOR: u8 = discriminators::CHANGE_SCHEMA_STATUS;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "changeSchemaStatus",
    discriminator: CHANGE_SCHEMA_STATUS_DISCRIMINATOR,
    accounts: &[
        AccountSpec {
            name: "authority",
            is_writable: false,
            is_signer: true,
            has_default: false,
            docs: None,
        },
        AccountSpec {
            name: "credential",
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: Some("Credential the Schema is associated with"),
        },
        AccountSpec {
            name: "schema",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: None,
        },
    ],
    args: &[
        ArgSpec { name: "is_paused", ty: "bool" },
    ],
    docs: Some("Pause or resume a schema"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaStatus {
    pub authority: Pubkey,
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    pub schema: Pubkey,
}

impl ChangeSchemaStatus {
    pub fn instruction(&self, args: &ChangeSchemaStatusArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &ChangeSchemaStatusArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &ChangeSchemaStatusArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.authority,
                self.credential,
                self.schema,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChangeSchemaStatusArgs {
    pub is_paused: bool,
}

impl InstructionArgs for ChangeSchemaStatusArgs {
    const DISCRIMINATOR: u8 = CHANGE_SCHEMA_STATUS_DISCRIMINATOR;
}

/// Instruction builder for `ChangeSchemaStatus`.
///
/// ### Accounts:
///
///   0. `[signer]` authority
///   1. `[]` credential
///   2. `[writable]` schema
#[derive(Clone, Debug, Default)]
pub struct ChangeSchemaStatusBuilder {
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    schema: Option<Pubkey>,
    is_paused: Option<bool>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl ChangeSchemaStatusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authority(&mut self, authority: Pubkey) -> &mut Self {
        self.authority = Some(authority);
        self
    }

    /// Credential the Schema is associated with
    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    pub fn schema(&mut self, schema: Pubkey) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    pub fn is_paused(&mut self, is_paused: bool) -> &mut Self {
        self.is_paused = Some(is_paused);
        self
    }

    pub fn program_id(&mut self, program_id: Pubkey) -> &mut Self {
        self.program_id = Some(program_id);
        self
    }

    /// Add an additional account to the instruction.
    pub fn add_remaining_account(&mut self, account: AccountMeta) -> &mut Self {
        self.remaining_accounts.push(account);
        self
    }

    /// Add additional accounts to the instruction.
    pub fn add_remaining_accounts(&mut self, accounts: &[AccountMeta]) -> &mut Self {
        self.remaining_accounts.extend_from_slice(accounts);
        self
    }

    pub fn instruction(&self) -> AttestationResult<Instruction> {
        let program_id = self.program_id.unwrap_or(ATTESTATION_PROGRAM_ID);
        let accounts = ChangeSchemaStatus {
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            schema: self.schema.ok_or(AttestationError::MissingAccount("schema"))?,
        };
        let args = ChangeSchemaStatusArgs {
            is_paused: self.is_paused.ok_or(AttestationError::MissingArgument("is_paused"))?,
        };

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `ChangeSchemaStatus`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaStatusAccountMetas {
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub schema: AccountMeta,
}

/// A decoded `ChangeSchemaStatus` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChangeSchemaStatus {
    pub program_id: Pubkey,
    pub accounts: ChangeSchemaStatusAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: ChangeSchemaStatusArgs,
}

pub fn parse_change_schema_status(instruction: &Instruction) -> AttestationResult<ParsedChangeSchemaStatus> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = ChangeSchemaStatusAccountMetas {
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        schema: cursor.next_account(),
    };
    let data = ChangeSchemaStatusArgs::unpack(&instruction.data)?;

    Ok(ParsedChangeSchemaStatus {
        program_id: instruction.program_id,
        accounts,
        remaining_accounts: cursor.remaining(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_layout() {
        assert_eq!(ChangeSchemaStatusArgs { is_paused: true }.pack().unwrap(), vec![2, 1]);
        assert_eq!(ChangeSchemaStatusArgs { is_paused: false }.pack().unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_parse_rejects_invalid_bool() {
        let mut instruction = ChangeSchemaStatusBuilder::new()
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .is_paused(false)
            .instruction()
            .unwrap();
        instruction.data[1] = 2;

        assert!(parse_change_schema_status(&instruction).is_err());
    }

    #[test]
    fn test_three_accounts_without_system_program() {
        let instruction = ChangeSchemaStatusBuilder::new()
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .is_paused(true)
            .instruction()
            .unwrap();
        assert_eq!(instruction.accounts.len(), 3);
    }
}
