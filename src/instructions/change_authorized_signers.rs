//! `ChangeAuthorizedSigners` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CHANGE_AUTHORIZED_SIGNERS_DISCRIMINATOR: u8 = discriminators::CHANGE_AUTHORIZED_SIGNERS;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "changeAuthorizedSigners",
    discriminator: CHANGE_AUTHORIZED_SIGNERS_DISCRIMINATOR,
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
        ArgSpec { name: "signers", ty: "vec<publicKey>" },
    ],
    docs: Some("Replace the set of signers allowed to attest under a credential"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeAuthorizedSigners {
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub credential: Pubkey,
    pub system_program: Pubkey,
}

impl ChangeAuthorizedSigners {
    pub fn instruction(&self, args: &ChangeAuthorizedSignersArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &ChangeAuthorizedSignersArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &ChangeAuthorizedSignersArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.payer,
                self.authority,
                self.credential,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChangeAuthorizedSignersArgs {
    pub signers: Vec<Pubkey>,
}

impl InstructionArgs for ChangeAuthorizedSignersArgs {
    const DISCRIMINATOR: u8 = CHANGE_AUTHORIZED_SIGNERS_DISCRIMINATOR;
}

/// Instruction builder for `ChangeAuthorizedSigners`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[signer]` authority
///   2. `[writable]` credential
///   3. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct ChangeAuthorizedSignersBuilder {
    payer: Option<Pubkey>,
    authority: Option<Pubkey>,
    credential: Option<Pubkey>,
    system_program: Option<Pubkey>,
    signers: Option<Vec<Pubkey>>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl ChangeAuthorizedSignersBuilder {
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

    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    /// `[optional account, default to '11111111111111111111111111111111']`
    pub fn system_program(&mut self, system_program: Pubkey) -> &mut Self {
        self.system_program = Some(system_program);
        self
    }

    pub fn signers(&mut self, signers: Vec<Pubkey>) -> &mut Self {
        self.signers = Some(signers);
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
        let accounts = ChangeAuthorizedSigners {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = ChangeAuthorizedSignersArgs {
            signers: self
                .signers
                .clone()
                .ok_or(AttestationError::MissingArgument("signers"))?,
        };

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `ChangeAuthorizedSigners`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeAuthorizedSignersAccountMetas {
    pub payer: AccountMeta,
    pub authority: AccountMeta,
    pub credential: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `ChangeAuthorizedSigners` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChangeAuthorizedSigners {
    pub program_id: Pubkey,
    pub accounts: ChangeAuthorizedSignersAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: ChangeAuthorizedSignersArgs,
}

pub fn parse_change_authorized_signers(instruction: &Instruction) -> AttestationResult<ParsedChangeAuthorizedSigners> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = ChangeAuthorizedSignersAccountMetas {
        payer: cursor.next_account(),
        authority: cursor.next_account(),
        credential: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = ChangeAuthorizedSignersArgs::unpack(&instruction.data)?;

    Ok(ParsedChangeAuthorizedSigners {
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
    fn test_empty_signer_list() {
        assert_eq!(
            ChangeAuthorizedSignersArgs { signers: vec![] }.pack().unwrap(),
            vec![3, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_parse_keeps_remaining_accounts() {
        let extra = AccountMeta::new(Pubkey::new_unique(), false);
        let instruction = ChangeAuthorizedSignersBuilder::new()
            .payer(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .signers(vec![Pubkey::new_unique(), Pubkey::new_unique()])
            .add_remaining_account(extra.clone())
            .instruction()
            .unwrap();

        let parsed = parse_change_authorized_signers(&instruction).unwrap();
        assert_eq!(parsed.data.signers.len(), 2);
        assert_eq!(parsed.remaining_accounts, vec![extra]);
    }
}
