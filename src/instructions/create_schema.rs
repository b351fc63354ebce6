//! `CreateSchema` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CREATE_SCHEMA_DISCRIMINATOR: u8 = discriminators::CREATE_SCHEMA;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "createSchema",
    discriminator: CREATE_SCHEMA_DISCRIMINATOR,
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
            name: "schema",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: Some("Schema PDA to create"),
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
        ArgSpec { name: "name", ty: "string" },
        ArgSpec { name: "description", ty: "string" },
        ArgSpec { name: "layout", ty: "bytes" },
        ArgSpec { name: "field_names", ty: "vec<string>" },
    ],
    docs: Some("Register a schema under a credential"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSchema {
    pub payer: Pubkey,
    pub authority: Pubkey,
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    /// Schema PDA to create
    pub schema: Pubkey,
    pub system_program: Pubkey,
}

impl CreateSchema {
    pub fn instruction(&self, args: &CreateSchemaArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &CreateSchemaArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &CreateSchemaArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.payer,
                self.authority,
                self.credential,
                self.schema,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateSchemaArgs {
    pub name: String,
    pub description: String,
    pub layout: Vec<u8>,
    pub field_names: Vec<String>,
}

impl InstructionArgs for CreateSchemaArgs {
    const DISCRIMINATOR: u8 = CREATE_SCHEMA_DISCRIMINATOR;
}

/// Instruction builder for `CreateSchema`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[writable]` schema
///   4. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct CreateSchemaBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    schema: Option<Pubkey>,
    system_program: Option<Pubkey>,
    name: Option<String>,
    description: Option<String>,
    layout: Option<Vec<u8>>,
    field_names: Option<Vec<String>>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl CreateSchemaBuilder {
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

    /// Schema PDA to create
    pub fn schema(&mut self, schema: Pubkey) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn name(&mut self, name: String) -> &mut Self {
        self.name = Some(name);
        self
    }

    pub fn description(&mut self, description: String) -> &mut Self {
        self.description = Some(description);
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
        let accounts = CreateSchema {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            schema: self.schema.ok_or(AttestationError::MissingAccount("schema"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = CreateSchemaArgs {
            name: self
                .name
                .clone()
                .ok_or(AttestationError::MissingArgument("name"))?,
            description: self
                .description
                .clone()
                .ok_or(AttestationError::MissingArgument("description"))?,
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

/// Account metas of a decoded `CreateSchema`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSchemaAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub schema: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `CreateSchema` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCreateSchema {
    pub program_id: Pubkey,
    pub accounts: CreateSchemaAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: CreateSchemaArgs,
}

pub fn parse_create_schema(instruction: &Instruction) -> AttestationResult<ParsedCreateSchema> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = CreateSchemaAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        schema: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = CreateSchemaArgs::unpack(&instruction.data)?;

    Ok(ParsedCreateSchema {
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
    fn test_roundtrip_through_parser() {
        let args = CreateSchemaArgs {
            name: "test_data".to_string(),
            description: "schema for test data".to_string(),
            layout: vec![12, 0],
            field_names: vec!["name".to_string(), "location".to_string()],
        };
        let accounts = CreateSchema {
            payer: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            system_program: SYSTEM_PROGRAM_ID,
        };

        let instruction = accounts.instruction(&args).unwrap();
        assert_eq!(instruction.data[0], 1);

        let parsed = parse_create_schema(&instruction).unwrap();
        assert_eq!(parsed.data, args);
        assert_eq!(parsed.accounts.schema, AccountMeta::new(accounts.schema, false));
        assert!(parsed.remaining_accounts.is_empty());
    }
}
