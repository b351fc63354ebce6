//! One-byte discriminators for instructions and program-owned accounts

// Instruction discriminators
pub const CREATE_CREDENTIAL: u8 = 0;
pub const CREATE_SCHEMA: u8 = 1;
pub const CHANGE_SCHEMA_STATUS: u8 = 2;
pub const CHANGE_AUTHORIZED_SIGNERS: u8 = 3;
pub const CHANGE_SCHEMA_DESCRIPTION: u8 = 4;
pub const CHANGE_SCHEMA_VERSION: u8 = 5;
pub const CREATE_ATTESTATION: u8 = 6;
pub const CLOSE_ATTESTATION: u8 = 7;
pub const CREATE_REQUEST: u8 = 8;

// Account discriminators
pub const CREDENTIAL_ACCOUNT: u8 = 0;
pub const SCHEMA_ACCOUNT: u8 = 1;
pub const ATTESTATION_ACCOUNT: u8 = 2;
pub const REQUEST_ACCOUNT: u8 = 3;
