//! Error handling for the attestation service client.
//!
//! Every fallible operation in the library returns [`AttestationResult`].
//! The variants are grouped by where a failure originates: instruction
//! building and parsing, account decoding, schema layouts, and RPC.

use solana_pubkey::Pubkey;
use thiserror::Error;

/// Main error type for the attestation service client.
#[derive(Error, Debug)]
pub enum AttestationError {
    /// A builder was asked for an instruction before a required account was set.
    #[error("Missing account: {0}")]
    MissingAccount(&'static str),

    /// A builder was asked for an instruction before a required argument was set.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// An instruction carried fewer account metas than the instruction names.
    #[error("Not enough accounts: expected at least {expected}, got {actual}")]
    NotEnoughAccounts { expected: usize, actual: usize },

    /// Instruction data was empty, so no discriminator could be read.
    #[error("Instruction data is empty")]
    EmptyInstructionData,

    /// The leading byte of the instruction data named a different instruction.
    #[error("Invalid instruction discriminator: expected {expected}, got {actual}")]
    InvalidDiscriminator { expected: u8, actual: u8 },

    /// The leading byte of the instruction data names no known instruction.
    #[error("Unknown instruction discriminator: {0}")]
    UnknownDiscriminator(u8),

    /// The instruction is addressed to another program.
    #[error("Instruction targets program {actual}, expected {expected}")]
    ProgramMismatch { expected: Pubkey, actual: Pubkey },

    /// Account data carried the discriminator of another account type.
    #[error("Account discriminator mismatch for {account}: expected {expected}, got {actual}")]
    AccountDiscriminatorMismatch {
        account: &'static str,
        expected: u8,
        actual: u8,
    },

    /// Account data was too short to hold even a discriminator.
    #[error("Account data for {0} is empty")]
    EmptyAccountData(&'static str),

    /// An account exists but is not owned by the attestation program.
    #[error("Account {address} is owned by {owner}, not the attestation program")]
    InvalidOwner { address: Pubkey, owner: Pubkey },

    /// A schema layout contains a type code with no known meaning.
    #[error("Unknown schema layout type: {0}")]
    UnknownLayoutType(u8),

    /// Attestation data does not match the schema it is checked against.
    #[error("Schema data error: {0}")]
    SchemaData(String),

    /// Borsh encoding or decoding failed (truncated input, invalid UTF-8, trailing bytes).
    #[error("Codec error: {0}")]
    Codec(#[from] std::io::Error),

    /// Errors related to RPC communication, such as connection failures.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Errors related to writing the interface description.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<solana_client::client_error::ClientError> for AttestationError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        AttestationError::Rpc(err.to_string())
    }
}

/// Result type alias for the attestation service client.
pub type AttestationResult<T> = Result<T, AttestationError>;
