//! Interface description of the attestation service program

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;

use crate::constants::discriminators::{
    ATTESTATION_ACCOUNT, CREDENTIAL_ACCOUNT, REQUEST_ACCOUNT, SCHEMA_ACCOUNT,
};
use crate::instructions::all_specs;
use crate::models::account::Account;
use crate::models::instruction::Instruction;

/// Interface description of a Solana program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramInterface {
    /// Program name
    pub name: String,
    /// Interface version
    pub version: String,
    /// Program address
    pub address: String,
    /// Program instructions
    pub instructions: Vec<Instruction>,
    /// Program accounts
    pub accounts: Vec<Account>,
    /// Program metadata
    pub metadata: Metadata,
}

/// Program metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// Program origin (native, pinocchio, anchor, etc.)
    pub origin: String,
    /// Width of instruction and account discriminators in bytes
    pub discriminator_size: u8,
}

impl ProgramInterface {
    /// Create an empty interface description
    pub fn new(name: String, address: String) -> Self {
        Self {
            name,
            version: crate::VERSION.to_string(),
            address,
            instructions: Vec::new(),
            accounts: Vec::new(),
            metadata: Metadata {
                origin: "".to_string(),
                discriminator_size: 1,
            },
        }
    }

    /// Describe the attestation service deployed at `program_id`
    pub fn attestation_service(program_id: &Pubkey) -> Self {
        let mut interface = Self::new("solana_attestation_service".to_string(), program_id.to_string());
        interface.set_origin("pinocchio".to_string());

        for spec in all_specs() {
            interface.add_instruction(Instruction::from(spec));
        }

        let mut credential = Account::new("credential".to_string(), CREDENTIAL_ACCOUNT);
        credential.add_field("authority", "publicKey");
        credential.add_field("name", "bytes");
        credential.add_field("authorizedSigners", "vec<publicKey>");
        interface.add_account(credential);

        let mut schema = Account::new("schema".to_string(), SCHEMA_ACCOUNT);
        schema.add_field("credential", "publicKey");
        schema.add_field("name", "bytes");
        schema.add_field("description", "bytes");
        schema.add_field("layout", "bytes");
        schema.add_field("fieldNames", "bytes");
        schema.add_field("isPaused", "bool");
        schema.add_field("version", "u8");
        interface.add_account(schema);

        for (name, discriminator) in [("attestation", ATTESTATION_ACCOUNT), ("request", REQUEST_ACCOUNT)] {
            let mut account = Account::new(name.to_string(), discriminator);
            account.add_field("nonce", "publicKey");
            account.add_field("credential", "publicKey");
            account.add_field("schema", "publicKey");
            account.add_field("data", "bytes");
            account.add_field("signer", "publicKey");
            account.add_field("expiry", "i64");
            interface.add_account(account);
        }

        interface
    }

    /// Add an instruction, keeping the first one seen per discriminator
    pub fn add_instruction(&mut self, instruction: Instruction) {
        if !self
            .instructions
            .iter()
            .any(|i| i.discriminator == instruction.discriminator)
        {
            self.instructions.push(instruction);
        }
    }

    /// Add an account, keeping the first one seen per name
    pub fn add_account(&mut self, account: Account) {
        if !self.accounts.iter().any(|a| a.name == account.name) {
            self.accounts.push(account);
        }
    }

    pub fn set_origin(&mut self, origin: String) {
        self.metadata.origin = origin;
    }

    pub fn instruction(&self, name: &str) -> Option<&Instruction> {
        self.instructions.iter().find(|i| i.name == name)
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}
