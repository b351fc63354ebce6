//! A client library for the Solana Attestation Service
//!
//! This crate encodes and decodes the attestation program's instructions,
//! resolves the accounts each instruction touches, derives the program's
//! PDAs and decodes its account state.

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod instructions;
pub mod models;
pub mod state;
pub mod utils;

pub use crate::constants::ATTESTATION_PROGRAM_ID;
pub use crate::errors::{AttestationError, AttestationResult};
pub use crate::instructions::AttestationInstruction;

/// Version of the attestation client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
