//! `ChangeSchemaDescription` instruction
//!
//! Replaces the human-readable description of an existing schema. The
//! payload is the discriminator byte followed by the new description as a
//! `u32` little-endian length and its UTF-8 bytes.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CHANGE_SCHEMA_DESCRIPTION_DISCRIMINATOR: u8 = discriminators::CHANGE_SCHEMA_DESCRIPTION;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "changeSchemaDescription",
    discriminator: CHANGE_SCHEMA_DESCRIPTION_DISCRIMINATOR,
    accounts: &[
        AccountSpec { name: "payer", is_writable: true, is_signer: true, has_default: false, docs: None },
        AccountSpec { name: "authority", is_writable: false, is_signer: true, has_default: false, docs: None },
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
            docs: Some("Schema whose description is replaced"),
        },
        AccountSpec { name: "systemProgram", is_writable: false, is_signer: false, has_default: true, docs: None },
    ],
    args: &[ArgSpec { name: "description", ty: "string" }],
    docs: Some("Replace the description of an existing schema"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaDescription {
    pub payer: Pubkey,
    pub authority: Pubkey,
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    pub schema: Pubkey,
    pub system_program: Pubkey,
}

impl ChangeSchemaDescription {
    pub fn instruction(&self, args: &ChangeSchemaDescriptionArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &ChangeSchemaDescriptionArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    /// Build the instruction for a program deployed at another address
    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &ChangeSchemaDescriptionArgs,
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
pub struct ChangeSchemaDescriptionArgs {
    pub description: String,
}

impl InstructionArgs for ChangeSchemaDescriptionArgs {
    const DISCRIMINATOR: u8 = CHANGE_SCHEMA_DESCRIPTION_DISCRIMINATOR;
}

/// Instruction builder for `ChangeSchemaDescription`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[writable]` schema
///   4. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct ChangeSchemaDescriptionBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    schema: Option<Pubkey>,
    system_program: Option<Pubkey>,
    description: Option<String>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl ChangeSchemaDescriptionBuilder {
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

    pub fn schema(&mut self, schema: Pubkey) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn description(&mut self, description: String) -> &mut Self {
        self.description = Some(description);
        self
    }

    /// Target a program deployed somewhere other than the default address
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
        let accounts = ChangeSchemaDescription {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            schema: self.schema.ok_or(AttestationError::MissingAccount("schema"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = ChangeSchemaDescriptionArgs {
            description: self
                .description
                .clone()
                .ok_or(AttestationError::MissingArgument("description"))?,
        };

        accounts.instruction_for_program(
            self.program_id.unwrap_or(ATTESTATION_PROGRAM_ID),
            &args,
            &self.remaining_accounts,
        )
    }
}

/// Account metas of a decoded `ChangeSchemaDescription`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSchemaDescriptionAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    /// Credential the Schema is associated with
    pub credential: AccountMeta,
    pub schema: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `ChangeSchemaDescription` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChangeSchemaDescription {
    pub program_id: Pubkey,
    pub accounts: ChangeSchemaDescriptionAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub discriminator: u8,
    pub data: ChangeSchemaDescriptionArgs,
}

/// Decode a `ChangeSchemaDescription` instruction, assigning account metas
/// positionally
pub fn parse_change_schema_description(
    instruction: &Instruction,
) -> AttestationResult<ParsedChangeSchemaDescription> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = ChangeSchemaDescriptionAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        schema: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = ChangeSchemaDescriptionArgs::unpack(&instruction.data)?;

    Ok(ParsedChangeSchemaDescription {
        program_id: instruction.program_id,
        accounts,
        remaining_accounts: cursor.remaining(),
        discriminator: CHANGE_SCHEMA_DESCRIPTION_DISCRIMINATOR,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> ChangeSchemaDescription {
        ChangeSchemaDescription {
            payer: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            system_program: SYSTEM_PROGRAM_ID,
        }
    }

    #[test]
    fn test_data_layout() {
        let args = ChangeSchemaDescriptionArgs { description: "hi".to_string() };
        assert_eq!(args.pack().unwrap(), vec![4, 2, 0, 0, 0, b'h', b'i']);
    }

    #[test]
    fn test_empty_description_layout() {
        let args = ChangeSchemaDescriptionArgs { description: String::new() };
        assert_eq!(args.pack().unwrap(), vec![4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_multibyte_description_uses_byte_length() {
        let args = ChangeSchemaDescriptionArgs { description: "é".to_string() };
        assert_eq!(args.pack().unwrap(), vec![4, 2, 0, 0, 0, 0xC3, 0xA9]);
    }

    #[test]
    fn test_account_order_and_flags() {
        let accounts = accounts();
        let args = ChangeSchemaDescriptionArgs { description: "new".to_string() };
        let instruction = accounts.instruction(&args).unwrap();

        assert_eq!(instruction.program_id, ATTESTATION_PROGRAM_ID);
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new(accounts.payer, true),
                AccountMeta::new_readonly(accounts.authority, true),
                AccountMeta::new_readonly(accounts.credential, false),
                AccountMeta::new(accounts.schema, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ]
        );
    }

    #[test]
    fn test_builder_defaults_system_program() {
        let payer = Pubkey::new_unique();
        let instruction = ChangeSchemaDescriptionBuilder::new()
            .payer(payer)
            .authority(payer)
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .description("updated".to_string())
            .instruction()
            .unwrap();

        assert_eq!(instruction.accounts.len(), 5);
        assert_eq!(instruction.accounts[4].pubkey, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_builder_overrides_program_and_system_program() {
        let program_id = Pubkey::new_unique();
        let system_program = Pubkey::new_unique();
        let instruction = ChangeSchemaDescriptionBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .system_program(system_program)
            .program_id(program_id)
            .description("updated".to_string())
            .instruction()
            .unwrap();

        assert_eq!(instruction.program_id, program_id);
        assert_eq!(instruction.accounts[4].pubkey, system_program);
    }

    #[test]
    fn test_builder_missing_account() {
        let err = ChangeSchemaDescriptionBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .description("updated".to_string())
            .instruction()
            .unwrap_err();
        assert!(matches!(err, AttestationError::MissingAccount("credential")));
    }

    #[test]
    fn test_builder_missing_description() {
        let err = ChangeSchemaDescriptionBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .instruction()
            .unwrap_err();
        assert!(matches!(err, AttestationError::MissingArgument("description")));
    }

    #[test]
    fn test_parse_built_instruction() {
        let accounts = accounts();
        let extra = AccountMeta::new_readonly(Pubkey::new_unique(), false);
        let args = ChangeSchemaDescriptionArgs { description: "schema for test data".to_string() };
        let instruction = accounts
            .instruction_with_remaining_accounts(&args, &[extra.clone()])
            .unwrap();

        let parsed = parse_change_schema_description(&instruction).unwrap();
        assert_eq!(parsed.program_id, ATTESTATION_PROGRAM_ID);
        assert_eq!(parsed.discriminator, 4);
        assert_eq!(parsed.data, args);
        assert_eq!(parsed.accounts.payer.pubkey, accounts.payer);
        assert_eq!(parsed.accounts.schema, AccountMeta::new(accounts.schema, false));
        assert_eq!(parsed.remaining_accounts, vec![extra]);
    }

    #[test]
    fn test_parse_requires_five_accounts() {
        let mut instruction = accounts()
            .instruction(&ChangeSchemaDescriptionArgs { description: "x".to_string() })
            .unwrap();
        instruction.accounts.truncate(4);

        let err = parse_change_schema_description(&instruction).unwrap_err();
        assert!(matches!(err, AttestationError::NotEnoughAccounts { expected: 5, actual: 4 }));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let mut instruction = accounts()
            .instruction(&ChangeSchemaDescriptionArgs { description: "ab".to_string() })
            .unwrap();
        instruction.data = vec![4, 2, 0, 0, 0, 0xFF, 0xFE];

        let err = parse_change_schema_description(&instruction).unwrap_err();
        assert!(matches!(err, AttestationError::Codec(_)));
    }

    #[test]
    fn test_parse_rejects_truncated_payload() {
        let mut instruction = accounts()
            .instruction(&ChangeSchemaDescriptionArgs { description: "abc".to_string() })
            .unwrap();
        instruction.data.pop();

        assert!(parse_change_schema_description(&instruction).is_err());
    }

    #[test]
    fn test_parse_rejects_other_discriminator() {
        let mut instruction = accounts()
            .instruction(&ChangeSchemaDescriptionArgs { description: "abc".to_string() })
            .unwrap();
        instruction.data[0] = 1;

        let err = parse_change_schema_description(&instruction).unwrap_err();
        assert!(matches!(err, AttestationError::InvalidDiscriminator { expected: 4, actual: 1 }));
    }
}
