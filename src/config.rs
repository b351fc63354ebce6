//! Client configuration

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::debug;
use solana_keypair::{read_keypair_file, Keypair};
use solana_pubkey::Pubkey;

use crate::constants::{ATTESTATION_PROGRAM_ID, DEFAULT_RPC_URL};

/// Resolved settings shared by every CLI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub keypair_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: ATTESTATION_PROGRAM_ID,
            keypair_path: default_keypair_path(),
        }
    }
}

impl Config {
    /// Build a config, falling back to defaults for anything unset
    pub fn new(rpc_url: Option<String>, program_id: Option<Pubkey>, keypair_path: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        let config = Self {
            rpc_url: rpc_url.unwrap_or(defaults.rpc_url),
            program_id: program_id.unwrap_or(defaults.program_id),
            keypair_path: keypair_path.unwrap_or(defaults.keypair_path),
        };
        debug!("Resolved config: {:?}", config);
        config
    }

    /// Read the signing keypair
    pub fn load_keypair(&self) -> Result<Keypair> {
        load_keypair(&self.keypair_path)
    }
}

/// The Solana CLI's default keypair location
pub fn default_keypair_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("solana").join("id.json")
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path)
        .map_err(|e| anyhow!("Failed to read keypair file {}: {}", path.display(), e))
}
