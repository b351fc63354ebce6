//! `ChangeSchemaVersion` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CHANGE_SCHEMA_VERSION_DISCRIMINATOR: u8 = discriminators::CHANGE_SCHEMA_VERSION;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "changeSchemaVersion",
    discriminator: CHANGE_SCHEMA_VERSION_DISCRIMINATOR,
    accounts: &[
        AccountSpec {
            name: "payer",
            is_writable: true,
            is_signer: true,
            has_default: false,
            docs: None,
        },
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
            name: "existingSchema",
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: Some("Current version of the schema"),
        },
        AccountSpec {
            name: "newSchema",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: Some("Schema PDA for the next version"),
        },
        AccountSpec {
            name: "systemProgram",
            is_writable: false,
            is_signer: false,
            has_default: true,
            docs: None,
        },
    ],
    args: &[
        ArgSpec { name: "layout", ty: "bytes" },
        ArgSpec { name: "field_names", ty: "vec<string>" },
    ],
    docs: Some("Publish a new version of a schema with a different layout"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaVersion {
    pub payer: Pubkey,
    pub authority: Pubkey,
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    /// Current version of the schema
    pub existing_schema: Pubkey,
    /// Schema PDA for the next version
    pub new_schema: Pubkey,
    pub system_program: Pubkey,
}

impl ChangeSchemaVersion {
    pub fn instruction(&self, args: &ChangeSchemaVersionArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &ChangeSchemaVersionArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &ChangeSchemaVersionArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.payer,
                self.authority,
                self.credential,
                self.existing_schema,
                self.new_schema,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChangeSchemaVersionArgs {
    pub layout: Vec<u8>,
    pub field_names: Vec<String>,
}

impl InstructionArgs for ChangeSchemaVersionArgs {
    const DISCRIMINATOR: u8 = CHANGE_SCHEMA_VERSION_DISCRIMINATOR;
}

/// Instruction builder for `ChangeSchemaVersion`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[]` existing_schema
///   4. `[writable]` new_schema
///   5. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct ChangeSchemaVersionBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    existing_schema: Option<Pubkey>,
    new_schema: Option<Pubkey>,
    system_program: Option<Pubkey>,
    layout: Option<Vec<u8>>,
    field_names: Option<Vec<String>>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl ChangeSchemaVersionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payer(&mut self, payer: Pubkey) -> &mut Self {
        self.payer = Some(payer);
        self
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

    /// Current version of the schema
    pub fn existing_schema(&mut self, existing_schema: Pubkey) -> &mut Self {
        self.existing_schema = Some(existing_schema);
        self
    }

    /// Schema PDA for the next version
    pub fn new_schema(&mut self, new_schema: Pubkey) -> &mut Self {
        self.new_schema = Some(new_schema);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn layout(&mut self, layout: Vec<u8>) -> &mut Self {
        self.layout = Some(layout);
        self
    }

    pub fn field_names(&mut self, field_names: Vec<String>) -> &mut Self {
        self.field_names = Some(field_names);
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
        let accounts = ChangeSchemaVersion {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            existing_schema: self.existing_schema.ok_or(AttestationError::MissingAccount("existing_schema"))?,
            new_schema: self.new_schema.ok_or(AttestationError::MissingAccount("new_schema"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = ChangeSchemaVersionArgs {
            layout: self
                .layout
                .clone()
                .ok_or(AttestationError::MissingArgument("layout"))?,
            field_names: self
                .field_names
                .clone()
                .ok_or(AttestationError::MissingArgument("field_names"))?,
        };

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `ChangeSchemaVersion`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaVersionAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub existing_schema: AccountMeta,
    pub new_schema: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `ChangeSchemaVersion` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChangeSchemaVersion {
    pub program_id: Pubkey,
    pub accounts: ChangeSchemaVersionAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: ChangeSchemaVersionArgs,
}

pub fn parse_change_schema_version(instruction: &Instruction) -> AttestationResult<ParsedChangeSchemaVersion> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = ChangeSchemaVersionAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        existing_schema: cursor.next_account(),
        new_schema: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = ChangeSchemaVersionArgs::unpack(&instruction.data)?;

    Ok(ParsedChangeSchemaVersion {
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
    fn test_existing_schema_is_readonly() {
        let existing = Pubkey::new_unique();
        let new_schema = Pubkey::new_unique();
        let instruction = ChangeSchemaVersionBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .existing_schema(existing)
            .new_schema(new_schema)
            .layout(vec![12, 0, 10])
            .field_names(vec!["name".into(), "location".into(), "active".into()])
            .instruction()
            .unwrap();

        assert_eq!(instruction.accounts[3], AccountMeta::new_readonly(existing, false));
        assert_eq!(instruction.accounts[4], AccountMeta::new(new_schema, false));
        assert_eq!(instruction.data[0], 5);
    }
}
