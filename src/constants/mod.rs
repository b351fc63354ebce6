//! Constants used throughout the client

pub mod discriminators;
pub mod seeds;

use solana_pubkey::Pubkey;

/// Address of the deployed attestation service program
pub const ATTESTATION_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("22zoJMtdu4tQc2PzL74ZUT7FrwgB1Udec8DdW4yw4BdG");

/// Default address filled in for every `system_program` account
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;

/// First version assigned to a newly created schema
pub const INITIAL_SCHEMA_VERSION: u8 = 1;

/// Default cluster used by the CLI
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
