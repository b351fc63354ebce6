//! `CreateAttestation` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CREATE_ATTESTATION_DISCRIMINATOR: u8 = discriminators::CREATE_ATTESTATION;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "createAttestation",
    discriminator: CREATE_ATTESTATION_DISCRIMINATOR,
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
            docs: Some("Authorized signer of the credential"),
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
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: Some("Schema the Attestation is associated with"),
        },
        AccountSpec {
            name: "attestation",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: None,
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
        ArgSpec { name: "nonce", ty: "publicKey" },
        ArgSpec { name: "data", ty: "bytes" },
        ArgSpec { name: "expiry", ty: "i64" },
    ],
    docs: Some("Issue an attestation against a schema"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAttestation {
    pub payer: Pubkey,
    /// Authorized signer of the credential
    pub authority: Pubkey,
    /// Credential the Schema is associated with
    pub credential: Pubkey,
    /// Schema the Attestation is associated with
    pub schema: Pubkey,
    pub attestation: Pubkey,
    pub system_program: Pubkey,
}

impl CreateAttestation {
    pub fn instruction(&self, args: &CreateAttestationArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &CreateAttestationArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &CreateAttestationArgs,
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
                self.attestation,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateAttestationArgs {
    pub nonce: Pubkey,
    pub data: Vec<u8>,
    pub expiry: i64,
}

impl InstructionArgs for CreateAttestationArgs {
    const DISCRIMINATOR: u8 = CREATE_ATTESTATION_DISCRIMINATOR;
}

/// Instruction builder for `CreateAttestation`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[]` schema
///   4. `[writable]` attestation
///   5. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct CreateAttestationBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    schema: Option<Pubkey>,
    attestation: Option<Pubkey>,
    system_program: Option<Pubkey>,
    nonce: Option<Pubkey>,
    data: Option<Vec<u8>>,
    expiry: Option<i64>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl CreateAttestationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payer(&mut self, payer: Pubkey) -> &mut Self {
        self.payer = Some(payer);
        self
    }

    /// Authorized signer of the credential
    pub fn authority(&mut self, authority: Pubkey) -> &mut Self {
        self.authority = Some(authority);
        self
    }

    /// Credential the Schema is associated with
    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    /// Schema the Attestation is associated with
    pub fn schema(&mut self, schema: Pubkey) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    pub fn attestation(&mut self, attestation: Pubkey) -> &mut Self {
        self.attestation = Some(attestation);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn nonce(&mut self, nonce: Pubkey) -> &mut Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn data(&mut self, data: Vec<u8>) -> &mut Self {
        self.data = Some(data);
        self
    }

    pub fn expiry(&mut self, expiry: i64) -> &mut Self {
        self.expiry = Some(expiry);
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
        let accounts = CreateAttestation {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            schema: self.schema.ok_or(AttestationError::MissingAccount("schema"))?,
            attestation: self.attestation.ok_or(AttestationError::MissingAccount("attestation"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = CreateAttestationArgs {
            nonce: self.nonce.ok_or(AttestationError::MissingArgument("nonce"))?,
            data: self
                .data
                .clone()
                .ok_or(AttestationError::MissingArgument("data"))?,
            expiry: self.expiry.ok_or(AttestationError::MissingArgument("expiry"))?,
        };

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `CreateAttestation`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAttestationAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub schema: AccountMeta,
    pub attestation: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `CreateAttestation` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCreateAttestation {
    pub program_id: Pubkey,
    pub accounts: CreateAttestationAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: CreateAttestationArgs,
}

pub fn parse_create_attestation(instruction: &Instruction) -> AttestationResult<ParsedCreateAttestation> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = CreateAttestationAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        schema: cursor.next_account(),
        attestation: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = CreateAttestationArgs::unpack(&instruction.data)?;

    Ok(ParsedCreateAttestation {
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
        let args = CreateAttestationArgs {
            nonce: Pubkey::new_from_array([9; 32]),
            data: vec![1, 2, 3],
            expiry: -1,
        };

        let mut expected = vec![6];
        expected.extend_from_slice(&[9; 32]);
        expected.extend_from_slice(&[3, 0, 0, 0, 1, 2, 3]);
        expected.extend_from_slice(&(-1i64).to_le_bytes());
        assert_eq!(args.pack().unwrap(), expected);
    }

    #[test]
    fn test_parse_built_instruction() {
        let args = CreateAttestationArgs {
            nonce: Pubkey::new_unique(),
            data: vec![4, 0, 0, 0, b't', b'e', b's', b't', 1],
            expiry: 1_700_000_000,
        };
        let instruction = CreateAttestationBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .schema(Pubkey::new_unique())
            .attestation(Pubkey::new_unique())
            .nonce(args.nonce)
            .data(args.data.clone())
            .expiry(args.expiry)
            .instruction()
            .unwrap();

        let parsed = parse_create_attestation(&instruction).unwrap();
        assert_eq!(parsed.data, args);
        assert!(parsed.accounts.attestation.is_writable);
        assert!(!parsed.accounts.schema.is_writable);
    }
}
