use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use solana_pubkey::Pubkey;

use solana_attestation_client::constants::INITIAL_SCHEMA_VERSION;

#[derive(Parser, Debug)]
#[command(author, version, about = "Solana Attestation Service client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// RPC url
    #[arg(long, global = true, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to the payer and authority keypair
    #[arg(long, global = true, env = "KEYPAIR_PATH")]
    pub keypair: Option<PathBuf>,

    /// Attestation program id
    #[arg(long, global = true, env = "PROGRAM_ID")]
    pub program_id: Option<Pubkey>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a credential owned by the keypair
    CreateCredential(CreateCredentialArgs),
    CreateSchema(CreateSchemaArgs),
    ChangeSchemaDescription(ChangeSchemaDescriptionArgs),
    ChangeSchemaStatus(ChangeSchemaStatusArgs),
    ChangeAuthorizedSigners(ChangeAuthorizedSignersArgs),
    CreateAttestation(AttestationDataArgs),
    CloseAttestation(CloseAttestationArgs),
    CreateRequest(AttestationDataArgs),
    /// Fetch accounts and print them as JSON
    Query(QueryArgs),
    /// Print or save the program's interface description
    Idl(IdlArgs),
}

#[derive(Parser, Debug)]
pub struct CredentialArgs {
    #[arg(long, env = "CREDENTIAL_NAME")]
    pub credential_name: String,
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,

    #[arg(long, env = "SCHEMA_NAME")]
    pub schema_name: String,

    #[arg(long, default_value_t = INITIAL_SCHEMA_VERSION)]
    pub schema_version: u8,
}

#[derive(Parser, Debug)]
pub struct CreateCredentialArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,

    /// Authorized signer; defaults to the authority itself
    #[arg(long = "signer")]
    pub signers: Vec<Pubkey>,
}

#[derive(Parser, Debug)]
pub struct CreateSchemaArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,

    #[arg(long, env = "SCHEMA_NAME")]
    pub schema_name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Field as `name:type`, e.g. `recipient:string` or `scores:vec<u16>`
    #[arg(long = "field", required = true)]
    pub fields: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ChangeSchemaDescriptionArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    #[arg(long)]
    pub description: String,
}

#[derive(Parser, Debug)]
pub struct ChangeSchemaStatusArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    #[arg(long, action = clap::ArgAction::Set)]
    pub paused: bool,
}

#[derive(Parser, Debug)]
pub struct ChangeAuthorizedSignersArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,

    #[arg(long = "signer", required = true)]
    pub signers: Vec<Pubkey>,
}

#[derive(Parser, Debug)]
pub struct AttestationDataArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Field value as `name=value`; vectors are comma-separated
    #[arg(long = "value")]
    pub values: Vec<String>,

    /// Nonce used to derive the account address; random when unset
    #[arg(long)]
    pub nonce: Option<Pubkey>,

    /// Unix timestamp after which the attestation expires, 0 for never
    #[arg(long, default_value_t = 0)]
    pub expiry: i64,
}

#[derive(Parser, Debug)]
pub struct CloseAttestationArgs {
    #[arg(long)]
    pub attestation: Pubkey,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Credential,
    Schema,
    Attestation,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    #[arg(value_enum)]
    pub kind: QueryKind,

    #[arg(long, env = "CREDENTIAL_NAME")]
    pub credential_name: Option<String>,

    #[arg(long, env = "SCHEMA_NAME")]
    pub schema_name: Option<String>,

    #[arg(long, default_value_t = INITIAL_SCHEMA_VERSION)]
    pub schema_version: u8,
}

#[derive(Parser, Debug)]
pub struct IdlArgs {
    /// Save to this path instead of printing
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_change_schema_description() {
        let cli = Cli::try_parse_from([
            "sas",
            "change-schema-description",
            "--credential-name",
            "issuer",
            "--schema-name",
            "kyc",
            "--description",
            "updated",
        ])
        .unwrap();

        match cli.command {
            Commands::ChangeSchemaDescription(args) => {
                assert_eq!(args.schema.credential.credential_name, "issuer");
                assert_eq!(args.schema.schema_name, "kyc");
                assert_eq!(args.schema.schema_version, 1);
                assert_eq!(args.description, "updated");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_query_kind() {
        let cli = Cli::try_parse_from(["sas", "query", "schema", "--credential-name", "issuer"]).unwrap();
        match cli.command {
            Commands::Query(args) => assert_eq!(args.kind, QueryKind::Schema),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
