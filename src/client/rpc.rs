//! RPC request helpers for program-owned accounts

use solana_account::Account;
use solana_account_decoder_client_types::UiAccountEncoding;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_pubkey::Pubkey;

use crate::errors::{AttestationError, AttestationResult};
use crate::state::{offsets, ProgramAccount};

/// Filter matching one account type by its discriminator
pub fn discriminator_filter(discriminator: u8) -> RpcFilterType {
    RpcFilterType::Memcmp(Memcmp::new_base58_encoded(offsets::DISCRIMINATOR, &[discriminator]))
}

/// Filter matching a public key stored at `offset`
pub fn pubkey_filter(offset: usize, pubkey: &Pubkey) -> RpcFilterType {
    RpcFilterType::Memcmp(Memcmp::new_base58_encoded(offset, pubkey.as_ref()))
}

/// `getProgramAccounts` configuration returning full base64 account data
pub fn program_accounts_config(filters: Vec<RpcFilterType>) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(filters),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..RpcAccountInfoConfig::default()
        },
        with_context: Some(false),
        ..RpcProgramAccountsConfig::default()
    }
}

/// Decode an account fetched from the cluster after checking its owner
pub fn decode_account<T: ProgramAccount>(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> AttestationResult<T> {
    if account.owner != *program_id {
        return Err(AttestationError::InvalidOwner {
            address: *address,
            owner: account.owner,
        });
    }
    T::from_bytes(&account.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Credential;

    fn account(owner: Pubkey, data: Vec<u8>) -> Account {
        Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        }
    }

    #[test]
    fn test_decode_account_checks_owner() {
        let program_id = Pubkey::new_unique();
        let credential = Credential {
            authority: Pubkey::new_unique(),
            name: b"test".to_vec(),
            authorized_signers: vec![],
        };
        let data = credential.to_bytes().unwrap();
        let address = Pubkey::new_unique();

        let decoded: Credential =
            decode_account(&address, &account(program_id, data.clone()), &program_id).unwrap();
        assert_eq!(decoded, credential);

        let err = decode_account::<Credential>(&address, &account(Pubkey::new_unique(), data), &program_id)
            .unwrap_err();
        assert!(matches!(err, AttestationError::InvalidOwner { .. }));
    }

    #[test]
    fn test_program_accounts_config() {
        let config = program_accounts_config(vec![discriminator_filter(2)]);
        assert_eq!(config.filters.as_ref().map(Vec::len), Some(1));
        assert_eq!(config.account_config.encoding, Some(UiAccountEncoding::Base64));
    }
}
