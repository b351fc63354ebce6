//! `CreateRequest` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CREATE_REQUEST_DISCRIMINATOR: u8 = discriminators::CREATE_REQUEST;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "createRequest",
    discriminator: CREATE_REQUEST_DISCRIMINATOR,
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
            docs: Some("Issuer authority the request is addressed to"),
        },
        AccountSpec {
            name: "credential",
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: None,
        },
        AccountSpec {
            name: "schema",
            is_writable: false,
            is_signer: false,
            has_default: false,
            docs: None,
        },
        AccountSpec {
            name: "request",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: Some("Request PDA to create"),
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
    docs: Some("Ask a credential's signers to attest the given data"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub payer: Pubkey,
    /// Issuer authority the request is addressed to
    pub authority: Pubkey,
    pub credential: Pubkey,
    pub schema: Pubkey,
    /// Request PDA to create
    pub request: Pubkey,
    pub system_program: Pubkey,
}

impl CreateRequest {
    pub fn instruction(&self, args: &CreateRequestArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &CreateRequestArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &CreateRequestArgs,
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
                self.request,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateRequestArgs {
    pub nonce: Pubkey,
    pub data: Vec<u8>,
    pub expiry: i64,
}

impl InstructionArgs for CreateRequestArgs {
    const DISCRIMINATOR: u8 = CREATE_REQUEST_DISCRIMINATOR;
}

/// Instruction builder for `CreateRequest`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[]` schema
///   4. `[writable]` request
///   5. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct CreateRequestBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    schema: Option<Pubkey>,
    request: Option<Pubkey>,
    system_program: Option<Pubkey>,
    nonce: Option<Pubkey>,
    data: Option<Vec<u8>>,
    expiry: Option<i64>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl CreateRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payer(&mut self, payer: Pubkey) -> &mut Self {
        self.payer = Some(payer);
        self
    }

    /// Issuer authority the request is addressed to
    pub fn authority(&mut self, authority: Pubkey) -> &mut Self {
        self.authority = Some(authority);
        self
    }

    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    pub fn schema(&mut self, schema: Pubkey) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// Request PDA to create
    pub fn request(&mut self, request: Pubkey) -> &mut Self {
        self.request = Some(request);
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
        let accounts = CreateRequest {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            schema: self.schema.ok_or(AttestationError::MissingAccount("schema"))?,
            request: self.request.ok_or(AttestationError::MissingAccount("request"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = CreateRequestArgs {
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

/// Account metas of a decoded `CreateRequest`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequestAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub schema: AccountMeta,
    pub request: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `CreateRequest` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCreateRequest {
    pub program_id: Pubkey,
    pub accounts: CreateRequestAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: CreateRequestArgs,
}

pub fn parse_create_request(instruction: &Instruction) -> AttestationResult<ParsedCreateRequest> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = CreateRequestAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        schema: cursor.next_account(),
        request: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = CreateRequestArgs::unpack(&instruction.data)?;

    Ok(ParsedCreateRequest {
        program_id: instruction.program_id,
        accounts,
        remaining_accounts: cursor.remaining(),
        data,
    })
}
