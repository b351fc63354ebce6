//! RPC client for the attestation service program

pub mod rpc;

use log::{debug, info, warn};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::constants::discriminators::{ATTESTATION_ACCOUNT, CREDENTIAL_ACCOUNT, SCHEMA_ACCOUNT};
use crate::errors::AttestationResult;
use crate::state::{offsets, Attestation, Credential, ProgramAccount, Request, Schema};

/// Client for reading and writing attestation service accounts
pub struct AttestationClient {
    rpc_client: RpcClient,
    program_id: Pubkey,
}

impl AttestationClient {
    /// Create a new client for the program at `program_id`
    pub fn new(rpc_url: &str, program_id: Pubkey) -> Self {
        let rpc_client =
            RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

        Self {
            rpc_client,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }

    /// Fetch and decode one program account
    pub async fn fetch<T: ProgramAccount>(&self, address: &Pubkey) -> AttestationResult<T> {
        debug!("Fetching {} account {}", T::NAME, address);
        let account = self.rpc_client.get_account(address).await?;
        rpc::decode_account(address, &account, &self.program_id)
    }

    pub async fn fetch_credential(&self, address: &Pubkey) -> AttestationResult<Credential> {
        self.fetch(address).await
    }

    pub async fn fetch_schema(&self, address: &Pubkey) -> AttestationResult<Schema> {
        self.fetch(address).await
    }

    pub async fn fetch_attestation(&self, address: &Pubkey) -> AttestationResult<Attestation> {
        self.fetch(address).await
    }

    pub async fn fetch_request(&self, address: &Pubkey) -> AttestationResult<Request> {
        self.fetch(address).await
    }

    /// Fetch all program accounts of type `T` matching `filters`.
    ///
    /// Accounts that fail to decode are skipped with a warning.
    async fn list<T: ProgramAccount>(
        &self,
        filters: Vec<solana_client::rpc_filter::RpcFilterType>,
    ) -> AttestationResult<Vec<(Pubkey, T)>> {
        let config = rpc::program_accounts_config(filters);
        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;

        let mut decoded = Vec::with_capacity(accounts.len());
        for (address, account) in accounts {
            match rpc::decode_account::<T>(&address, &account, &self.program_id) {
                Ok(value) => decoded.push((address, value)),
                Err(e) => warn!("Skipping {} account {}: {}", T::NAME, address, e),
            }
        }

        info!("Found {} {} accounts", decoded.len(), T::NAME);
        Ok(decoded)
    }

    pub async fn list_credentials(&self) -> AttestationResult<Vec<(Pubkey, Credential)>> {
        self.list(vec![rpc::discriminator_filter(CREDENTIAL_ACCOUNT)]).await
    }

    /// All schemas registered under a credential
    pub async fn list_schemas(&self, credential: &Pubkey) -> AttestationResult<Vec<(Pubkey, Schema)>> {
        self.list(vec![
            rpc::discriminator_filter(SCHEMA_ACCOUNT),
            rpc::pubkey_filter(offsets::SCHEMA_CREDENTIAL, credential),
        ])
        .await
    }

    /// All attestations issued under a credential and schema
    pub async fn list_attestations(
        &self,
        credential: &Pubkey,
        schema: &Pubkey,
    ) -> AttestationResult<Vec<(Pubkey, Attestation)>> {
        self.list(vec![
            rpc::discriminator_filter(ATTESTATION_ACCOUNT),
            rpc::pubkey_filter(offsets::ATTESTATION_CREDENTIAL, credential),
            rpc::pubkey_filter(offsets::ATTESTATION_SCHEMA, schema),
        ])
        .await
    }

    /// Sign `instructions` with the payer and any extra signers, send them in
    /// one transaction and wait for confirmation
    pub async fn send_instructions(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> AttestationResult<Signature> {
        let mut signers: Vec<&Keypair> = vec![payer];
        for signer in extra_signers {
            if signer.pubkey() != payer.pubkey() {
                signers.push(*signer);
            }
        }

        let recent_blockhash = self.rpc_client.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            recent_blockhash,
        );

        debug!(
            "Sending transaction with {} instructions and {} signers",
            instructions.len(),
            signers.len()
        );
        let signature = self.rpc_client.send_and_confirm_transaction(&transaction).await?;
        info!("Transaction confirmed: {}", signature);

        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ATTESTATION_PROGRAM_ID;

    #[tokio::test]
    async fn test_client_targets_program() {
        let client = AttestationClient::new("http://127.0.0.1:8899", ATTESTATION_PROGRAM_ID);
        assert_eq!(client.program_id(), &ATTESTATION_PROGRAM_ID);
        assert_eq!(client.rpc_client().url(), "http://127.0.0.1:8899");
    }
}
