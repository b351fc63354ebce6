mod cli;

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use serde_json::{json, Value};
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use solana_attestation_client::client::AttestationClient;
use solana_attestation_client::config::Config;
use solana_attestation_client::constants::INITIAL_SCHEMA_VERSION;
use solana_attestation_client::generator::{save_interface, to_json};
use solana_attestation_client::instructions::{
    ChangeAuthorizedSignersBuilder, ChangeSchemaDescriptionBuilder, ChangeSchemaStatusBuilder,
    CloseAttestationBuilder, CreateAttestationBuilder, CreateCredentialBuilder, CreateRequestBuilder,
    CreateSchemaBuilder,
};
use solana_attestation_client::models::idl::ProgramInterface;
use solana_attestation_client::state::{Attestation, Credential, Schema, SchemaDataType};
use solana_attestation_client::utils::{
    find_attestation_pda, find_credential_pda, find_request_pda, find_schema_pda,
};
use solana_attestation_client::VERSION;

use crate::cli::{AttestationDataArgs, Cli, Commands, QueryArgs, QueryKind, SchemaArgs};

fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            writeln!(buf, "{} [{}] - {}", secs, record.level(), record.args())
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let cli = Cli::parse();
    let config = Config::new(cli.rpc_url, cli.program_id, cli.keypair);
    info!("sas v{} using {} against {}", VERSION, config.program_id, config.rpc_url);

    match cli.command {
        Commands::Idl(args) => {
            let mut interface = ProgramInterface::attestation_service(&config.program_id);
            interface.set_origin("sas-cli".to_string());
            match args.output {
                Some(path) => save_interface(&interface, &path)?,
                None => println!("{}", to_json(&interface)?),
            }
        }
        Commands::Query(args) => {
            let client = AttestationClient::new(&config.rpc_url, config.program_id);
            let authority = config.load_keypair()?.pubkey();
            let output = query(&client, &authority, args).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        command => {
            let client = AttestationClient::new(&config.rpc_url, config.program_id);
            let payer = config.load_keypair()?;
            let instruction = build_instruction(&client, &payer.pubkey(), command).await?;
            let signature = client.send_instructions(&[instruction], &payer, &[]).await?;
            println!("{}", signature);
        }
    }

    Ok(())
}

/// Build the instruction a transaction-sending command submits. The
/// keypair acts as payer and authority.
async fn build_instruction(
    client: &AttestationClient,
    authority: &Pubkey,
    command: Commands,
) -> Result<Instruction> {
    let program_id = *client.program_id();
    let authority = *authority;

    let instruction = match command {
        Commands::CreateCredential(args) => {
            let name = args.credential.credential_name;
            let (credential, _) = find_credential_pda(&program_id, &authority, &name);
            let signers = if args.signers.is_empty() { vec![authority] } else { args.signers };
            info!("Creating credential {:?} at {}", name, credential);
            CreateCredentialBuilder::new()
                .payer(authority)
                .credential(credential)
                .authority(authority)
                .name(name)
                .signers(signers)
                .program_id(program_id)
                .instruction()?
        }
        Commands::CreateSchema(args) => {
            let (credential, _) =
                find_credential_pda(&program_id, &authority, &args.credential.credential_name);
            let (schema, _) =
                find_schema_pda(&program_id, &credential, &args.schema_name, INITIAL_SCHEMA_VERSION);
            let (field_names, layout) = parse_fields(&args.fields)?;
            info!("Creating schema {:?} at {}", args.schema_name, schema);
            CreateSchemaBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(credential)
                .schema(schema)
                .name(args.schema_name)
                .description(args.description)
                .layout(layout)
                .field_names(field_names)
                .program_id(program_id)
                .instruction()?
        }
        Commands::ChangeSchemaDescription(args) => {
            let (credential, schema) = schema_address(&program_id, &authority, &args.schema);
            info!("Changing description of schema {}", schema);
            ChangeSchemaDescriptionBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(credential)
                .schema(schema)
                .description(args.description)
                .program_id(program_id)
                .instruction()?
        }
        Commands::ChangeSchemaStatus(args) => {
            let (credential, schema) = schema_address(&program_id, &authority, &args.schema);
            info!("Setting schema {} paused={}", schema, args.paused);
            ChangeSchemaStatusBuilder::new()
                .authority(authority)
                .credential(credential)
                .schema(schema)
                .is_paused(args.paused)
                .program_id(program_id)
                .instruction()?
        }
        Commands::ChangeAuthorizedSigners(args) => {
            let (credential, _) =
                find_credential_pda(&program_id, &authority, &args.credential.credential_name);
            info!("Replacing {} authorized signers of credential {}", args.signers.len(), credential);
            ChangeAuthorizedSignersBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(credential)
                .signers(args.signers)
                .program_id(program_id)
                .instruction()?
        }
        Commands::CreateAttestation(args) => {
            let (credential, schema, nonce, data) =
                attestation_inputs(client, &program_id, &authority, &args).await?;
            let (attestation, _) =
                find_attestation_pda(&program_id, &credential, &authority, &schema, &nonce);
            info!("Creating attestation {} with nonce {}", attestation, nonce);
            CreateAttestationBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(credential)
                .schema(schema)
                .attestation(attestation)
                .nonce(nonce)
                .data(data)
                .expiry(args.expiry)
                .program_id(program_id)
                .instruction()?
        }
        Commands::CreateRequest(args) => {
            let (credential, schema, nonce, data) =
                attestation_inputs(client, &program_id, &authority, &args).await?;
            let (request, _) = find_request_pda(&program_id, &credential, &schema, &nonce);
            info!("Creating request {} with nonce {}", request, nonce);
            CreateRequestBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(credential)
                .schema(schema)
                .request(request)
                .nonce(nonce)
                .data(data)
                .expiry(args.expiry)
                .program_id(program_id)
                .instruction()?
        }
        Commands::CloseAttestation(args) => {
            let attestation = client
                .fetch_attestation(&args.attestation)
                .await
                .with_context(|| format!("Failed to fetch attestation {}", args.attestation))?;
            info!("Closing attestation {}", args.attestation);
            CloseAttestationBuilder::new()
                .payer(authority)
                .authority(authority)
                .credential(attestation.credential)
                .attestation(args.attestation)
                .program_id(program_id)
                .instruction()?
        }
        Commands::Idl(_) | Commands::Query(_) => bail!("Command does not send a transaction"),
    };

    Ok(instruction)
}

fn schema_address(program_id: &Pubkey, authority: &Pubkey, args: &SchemaArgs) -> (Pubkey, Pubkey) {
    let (credential, _) = find_credential_pda(program_id, authority, &args.credential.credential_name);
    let (schema, _) = find_schema_pda(program_id, &credential, &args.schema_name, args.schema_version);
    (credential, schema)
}

/// Split `name:type` field definitions into names and layout codes
fn parse_fields(fields: &[String]) -> Result<(Vec<String>, Vec<u8>)> {
    let mut names = Vec::with_capacity(fields.len());
    let mut layout = Vec::with_capacity(fields.len());
    for field in fields {
        let (name, ty) = field
            .split_once(':')
            .ok_or_else(|| anyhow!("Field {:?} is not of the form name:type", field))?;
        let ty: SchemaDataType = ty.parse()?;
        names.push(name.trim().to_string());
        layout.push(ty.code());
    }
    Ok((names, layout))
}

/// Resolve the accounts, nonce and encoded data for an attestation or request
async fn attestation_inputs(
    client: &AttestationClient,
    program_id: &Pubkey,
    authority: &Pubkey,
    args: &AttestationDataArgs,
) -> Result<(Pubkey, Pubkey, Pubkey, Vec<u8>)> {
    let (credential, schema) = schema_address(program_id, authority, &args.schema);
    let schema_account = client
        .fetch_schema(&schema)
        .await
        .with_context(|| format!("Failed to fetch schema {}", schema))?;
    if schema_account.is_paused {
        bail!("Schema {} is paused", schema);
    }

    let values = args
        .values
        .iter()
        .map(|value| {
            value
                .split_once('=')
                .ok_or_else(|| anyhow!("Value {:?} is not of the form name=value", value))
        })
        .collect::<Result<Vec<_>>>()?;
    let data = schema_account.encode_named_values(&values)?;

    let nonce = args.nonce.unwrap_or_else(|| Keypair::new().pubkey());
    Ok((credential, schema, nonce, data))
}

async fn query(client: &AttestationClient, authority: &Pubkey, args: QueryArgs) -> Result<Value> {
    let program_id = *client.program_id();
    let credential = args
        .credential_name
        .as_deref()
        .map(|name| find_credential_pda(&program_id, authority, name).0);

    match args.kind {
        QueryKind::Credential => match credential {
            Some(address) => Ok(credential_json(&address, &client.fetch_credential(&address).await?)),
            None => {
                let credentials = client.list_credentials().await?;
                Ok(Value::Array(
                    credentials.iter().map(|(address, c)| credential_json(address, c)).collect(),
                ))
            }
        },
        QueryKind::Schema => {
            let credential = credential.ok_or_else(|| anyhow!("--credential-name is required"))?;
            match args.schema_name.as_deref() {
                Some(name) => {
                    let (address, _) =
                        find_schema_pda(&program_id, &credential, name, args.schema_version);
                    Ok(schema_json(&address, &client.fetch_schema(&address).await?)?)
                }
                None => {
                    let schemas = client.list_schemas(&credential).await?;
                    Ok(Value::Array(
                        schemas
                            .iter()
                            .map(|(address, s)| schema_json(address, s))
                            .collect::<Result<Vec<_>>>()?,
                    ))
                }
            }
        }
        QueryKind::Attestation => {
            let credential = credential.ok_or_else(|| anyhow!("--credential-name is required"))?;
            let name = args
                .schema_name
                .as_deref()
                .ok_or_else(|| anyhow!("--schema-name is required"))?;
            let (schema_address, _) =
                find_schema_pda(&program_id, &credential, name, args.schema_version);
            let schema = client.fetch_schema(&schema_address).await?;
            let attestations = client.list_attestations(&credential, &schema_address).await?;
            Ok(Value::Array(
                attestations
                    .iter()
                    .map(|(address, a)| attestation_json(address, a, &schema))
                    .collect::<Result<Vec<_>>>()?,
            ))
        }
    }
}

fn credential_json(address: &Pubkey, credential: &Credential) -> Value {
    json!({
        "address": address.to_string(),
        "authority": credential.authority.to_string(),
        "name": credential.name(),
        "authorizedSigners": credential
            .authorized_signers
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
    })
}

fn schema_json(address: &Pubkey, schema: &Schema) -> Result<Value> {
    let fields = schema
        .field_names()?
        .into_iter()
        .zip(schema.data_types()?)
        .map(|(name, ty)| json!({ "name": name, "type": ty.name() }))
        .collect::<Vec<_>>();

    Ok(json!({
        "address": address.to_string(),
        "credential": schema.credential.to_string(),
        "name": schema.name(),
        "description": schema.description(),
        "version": schema.version,
        "isPaused": schema.is_paused,
        "fields": fields,
    }))
}

fn attestation_json(address: &Pubkey, attestation: &Attestation, schema: &Schema) -> Result<Value> {
    let values = schema.decode_data(&attestation.data)?;
    let data = schema
        .field_names()?
        .into_iter()
        .zip(values)
        .map(|(name, value)| Ok((name, serde_json::to_value(value)?)))
        .collect::<Result<serde_json::Map<_, _>>>()?;

    Ok(json!({
        "address": address.to_string(),
        "nonce": attestation.nonce.to_string(),
        "signer": attestation.signer.to_string(),
        "expiry": attestation.expiry,
        "data": data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let fields = vec!["name:string".to_string(), "scores: vec<u16>".to_string()];
        let (names, layout) = parse_fields(&fields).unwrap();
        assert_eq!(names, vec!["name", "scores"]);
        assert_eq!(layout, vec![12, 14]);
    }

    #[test]
    fn test_parse_fields_rejects_bad_input() {
        assert!(parse_fields(&["name".to_string()]).is_err());
        assert!(parse_fields(&["name:float".to_string()]).is_err());
    }
}
