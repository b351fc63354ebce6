//! `CloseAttestation` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};
use crate::utils::pda::find_event_authority_pda;

pub const CLOSE_ATTESTATION_DISCRIMINATOR: u8 = discriminators::CLOSE_ATTESTATION;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "closeAttestation",
    discriminator: CLOSE_ATTESTATION_DISCRIMINATOR,
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
            docs: None,
        },
        AccountSpec {
            name: "attestation",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: None,
        },
        AccountSpec {
            name: "eventAuthority",
            is_writable: false,
            is_signer: false,
            has_default: true,
            docs: None,
        },
        AccountSpec {
            name: "systemProgram",
            is_writable: false,
            is_signer: false,
            has_default: true,
            docs: None,
        },
        AccountSpec {
            name: "attestationProgram",
            is_writable: false,
            is_signer: false,
            has_default: true,
            docs: None,
        },
    ],
    args: &[],
    docs: Some("Close an attestation and return its rent to the payer"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseAttestation {
    pub payer: Pubkey,
    /// Authorized signer of the credential
    pub authority: Pubkey,
    pub credential: Pubkey,
    pub attestation: Pubkey,
    pub event_authority: Pubkey,
    pub system_program: Pubkey,
    pub attestation_program: Pubkey,
}

impl CloseAttestation {
    pub fn instruction(&self, args: &CloseAttestationArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &CloseAttestationArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &CloseAttestationArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.payer,
                self.authority,
                self.credential,
                self.attestation,
                self.event_authority,
                self.system_program,
                self.attestation_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CloseAttestationArgs {}

impl InstructionArgs for CloseAttestationArgs {
    const DISCRIMINATOR: u8 = CLOSE_ATTESTATION_DISCRIMINATOR;
}

/// Instruction builder for `CloseAttestation`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[]` credential
///   3. `[writable]` attestation
///   4. `[optional]` event_authority (default to the program's event authority PDA)
///   5. `[optional]` system_program (default to `11111111111111111111111111111111`)
///   6. `[optional]` attestation_program (default to the target program id)
#[derive(Clone, Debug, Default)]
pub struct CloseAttestationBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    attestation: Option<Pubkey>,
    event_authority: Option<Pubkey>,
    system_program: Option<Pubkey>,
    attestation_program: Option<Pubkey>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl CloseAttestationBuilder {
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

    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    pub fn attestation(&mut self, attestation: Pubkey) -> &mut Self {
        self.attestation = Some(attestation);
        self
    }

    /// `[optional account]`
    pub fn event_authority(&mut self, event_authority: Pubkey) -> &mut Self {
        self.event_authority = Some(event_authority);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    /// `[optional account]`
    pub fn attestation_program(&mut self, attestation_program: Pubkey) -> &mut Self {
        self.attestation_program = Some(attestation_program);
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
        let accounts = CloseAttestation {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            attestation: self.attestation.ok_or(AttestationError::MissingAccount("attestation"))?,
            event_authority: self
                .event_authority
                .unwrap_or_else(|| find_event_authority_pda(&program_id).0),
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
            attestation_program: self.attestation_program.unwrap_or(program_id),
        };
        let args = CloseAttestationArgs {};

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `CloseAttestation`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseAttestationAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub attestation: AccountMeta,
    pub event_authority: AccountMeta,
    pub system_program: AccountMeta,
    pub attestation_program: AccountMeta,
}

/// A decoded `CloseAttestation` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCloseAttestation {
    pub program_id: Pubkey,
    pub accounts: CloseAttestationAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: CloseAttestationArgs,
}

pub fn parse_close_attestation(instruction: &Instruction) -> AttestationResult<ParsedCloseAttestation> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = CloseAttestationAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        attestation: cursor.next_account(),
        event_authority: cursor.next_account(),
        system_program: cursor.next_account(),
        attestation_program: cursor.next_account(),
    };
    let data = CloseAttestationArgs::unpack(&instruction.data)?;

    Ok(ParsedCloseAttestation {
        program_id: instruction.program_id,
        accounts,
        remaining_accounts: cursor.remaining(),
        data,
    })
}
