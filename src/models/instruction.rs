//! Instruction metadata for the interface description

use serde::{Deserialize, Serialize};

use crate::instructions::InstructionSpec;

/// Represents a program instruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instruction {
    /// Instruction name
    pub name: String,
    /// Instruction discriminator byte
    pub discriminator: u8,
    /// Required accounts, in program order
    pub accounts: Vec<AccountMeta>,
    /// Instruction arguments
    pub args: Vec<Argument>,
    /// Documentation
    pub docs: Option<String>,
}

/// Represents an instruction argument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Argument {
    /// Argument name
    pub name: String,
    /// Argument type
    #[serde(rename = "type")]
    pub ty: String,
}

/// Represents an account used by an instruction
/// This is our own AccountMeta, not solana_instruction::AccountMeta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountMeta {
    /// Account name
    pub name: String,
    /// Is this account a signer?
    pub is_signer: bool,
    /// Is this account writable?
    pub is_writable: bool,
    /// Can the builder fill this account in?
    pub is_optional: bool,
    /// Documentation
    pub docs: Option<String>,
}

impl From<&InstructionSpec> for Instruction {
    fn from(spec: &InstructionSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            discriminator: spec.discriminator,
            accounts: spec
                .accounts
                .iter()
                .map(|account| AccountMeta {
                    name: account.name.to_string(),
                    is_signer: account.is_signer,
                    is_writable: account.is_writable,
                    is_optional: account.has_default,
                    docs: account.docs.map(str::to_string),
                })
                .collect(),
            args: spec
                .args
                .iter()
                .map(|arg| Argument {
                    name: arg.name.to_string(),
                    ty: arg.ty.to_string(),
                })
                .collect(),
            docs: spec.docs.map(str::to_string),
        }
    }
}
