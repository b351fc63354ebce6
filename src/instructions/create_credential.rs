//! `CreateCredential` instruction

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{build_instruction, AccountCursor, AccountSpec, ArgSpec, InstructionArgs, InstructionSpec};
use crate::constants::{discriminators, ATTESTATION_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::errors::{AttestationError, AttestationResult};

pub const CREATE_CREDENTIAL_DISCRIMINATOR: u8 = discriminators::CREATE_CREDENTIAL;

pub const SPEC: InstructionSpec = InstructionSpec {
    name: "createCredential",
    discriminator: CREATE_CREDENTIAL_DISCRIMINATOR,
    accounts: &[
        AccountSpec {
            name: "payer",
            is_writable: true,
            is_signer: true,
            has_default: false,
            docs: None,
        },
        AccountSpec {
            name: "credential",
            is_writable: true,
            is_signer: false,
            has_default: false,
            docs: Some("Credential PDA to create"),
        },
        AccountSpec {
            name: "authority",
            is_writable: false,
            is_signer: true,
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
        ArgSpec { name: "name", ty: "string" },
        ArgSpec { name: "signers", ty: "vec<publicKey>" },
    ],
    docs: Some("Create a credential owned by an authority"),
};

/// Accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCredential {
    pub payer: Pubkey,
    /// Credential PDA to create
    pub credential: Pubkey,
    pub authority: Pubkey,
    pub system_program: Pubkey,
}

impl CreateCredential {
    pub fn instruction(&self, args: &CreateCredentialArgs) -> AttestationResult<Instruction> {
        self.instruction_with_remaining_accounts(args, &[])
    }

    pub fn instruction_with_remaining_accounts(
        &self,
        args: &CreateCredentialArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        self.instruction_for_program(ATTESTATION_PROGRAM_ID, args, remaining_accounts)
    }

    pub fn instruction_for_program(
        &self,
        program_id: Pubkey,
        args: &CreateCredentialArgs,
        remaining_accounts: &[AccountMeta],
    ) -> AttestationResult<Instruction> {
        build_instruction(
            &SPEC,
            program_id,
            &[
                self.payer,
                self.credential,
                self.authority,
                self.system_program,
            ],
            remaining_accounts,
            args,
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateCredentialArgs {
    pub name: String,
    pub signers: Vec<Pubkey>,
}

impl InstructionArgs for CreateCredentialArgs {
    const DISCRIMINATOR: u8 = CREATE_CREDENTIAL_DISCRIMINATOR;
}

/// Instruction builder for `CreateCredential`.
///
/// ### Accounts:
///
///   0. `[writable, signer]` payer
///   1. `[writable]` credential
///   2. `[signer]` authority
///   3. `[optional]` system_program (default to `11111111111111111111111111111111`)
#[derive(Clone, Debug, Default)]
pub struct CreateCredentialBuilder {
    payer: Option<Pubkey>,
    credential: Option<Pubkey>,
    authority: Option<Pubkey>,
    system_program: Option<Pubkey>,
    name: Option<String>,
    signers: Option<Vec<Pubkey>>,
    program_id: Option<Pubkey>,
    remaining_accounts: Vec<AccountMeta>,
}

impl CreateCredentialBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payer(&mut self, payer: Pubkey) -> &mut Self {
        self.payer = Some(payer);
        self
    }

    /// Credential PDA to create
    pub fn credential(&mut self, credential: Pubkey) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    pub fn authority(&mut self, authority: Pubkey) -> &mut Self {
        self.authority = Some(authority);
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
        let accounts = CreateCredential {
            payer: self.payer.ok_or(AttestationError::MissingAccount("payer"))?,
            credential: self.credential.ok_or(AttestationError::MissingAccount("credential"))?,
            authority: self.authority.ok_or(AttestationError::MissingAccount("authority"))?,
            system_program: self.system_program.unwrap_or(SYSTEM_PROGRAM_ID),
        };
        let args = CreateCredentialArgs {
            name: self
                .name
                .clone()
                .ok_or(AttestationError::MissingArgument("name"))?,
            signers: self
                .signers
                .clone()
                .ok_or(AttestationError::MissingArgument("signers"))?,
        };

        accounts.instruction_for_program(program_id, &args, &self.remaining_accounts)
    }
}

/// Account metas of a decoded `CreateCredential`, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCredentialAccountMetas {
    pub payer: AccountMeta,
    pub credential: AccountMeta,
    pub authority: AccountMeta,
    pub system_program: AccountMeta,
}

/// A decoded `CreateCredential` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCreateCredential {
    pub program_id: Pubkey,
    pub accounts: CreateCredentialAccountMetas,
    pub remaining_accounts: Vec<AccountMeta>,
    pub data: CreateCredentialArgs,
}

pub fn parse_create_credential(instruction: &Instruction) -> AttestationResult<ParsedCreateCredential> {
    let mut cursor = AccountCursor::new(&SPEC, &instruction.accounts)?;
    let accounts = CreateCredentialAccountMetas {
        payer: cursor.next_account(),
        credential: cursor.next_account(),
        authority: cursor.next_account(),
        system_program: cursor.next_account(),
    };
    let data = CreateCredentialArgs::unpack(&instruction.data)?;

    Ok(ParsedCreateCredential {
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
        let signer = Pubkey::new_from_array([7; 32]);
        let args = CreateCredentialArgs {
            name: "test".to_string(),
            signers: vec![signer],
        };

        let mut expected = vec![0, 4, 0, 0, 0];
        expected.extend_from_slice(b"test");
        expected.extend_from_slice(&[1, 0, 0, 0]);
        expected.extend_from_slice(&[7; 32]);
        assert_eq!(args.pack().unwrap(), expected);
    }

    #[test]
    fn test_credential_is_writable_but_not_signer() {
        let authority = Pubkey::new_unique();
        let credential = Pubkey::new_unique();
        let instruction = CreateCredentialBuilder::new()
            .payer(authority)
            .credential(credential)
            .authority(authority)
            .name("test".to_string())
            .signers(vec![authority])
            .instruction()
            .unwrap();

        assert_eq!(instruction.accounts[1], AccountMeta::new(credential, false));
        assert_eq!(instruction.accounts[2], AccountMeta::new_readonly(authority, true));
        assert_eq!(instruction.accounts[3].pubkey, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_builder_requires_signers() {
        let err = CreateCredentialBuilder::new()
            .payer(Pubkey::new_unique())
            .credential(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .name("test".to_string())
            .instruction()
            .unwrap_err();
        assert!(matches!(err, AttestationError::MissingArgument("signers")));
    }
}
