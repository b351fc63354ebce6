//! Program-derived address helpers
//!
//! Every account the attestation program creates lives at a PDA. These
//! helpers return the address together with its bump seed, derived against
//! whichever program id the caller targets.

use solana_pubkey::Pubkey;

use crate::constants::seeds::{
    ATTESTATION_SEED, CREDENTIAL_SEED, EVENT_AUTHORITY_SEED, REQUEST_SEED, SCHEMA_SEED,
};

/// Derive the credential PDA owned by `authority` under `name`
pub fn find_credential_pda(program_id: &Pubkey, authority: &Pubkey, name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CREDENTIAL_SEED, authority.as_ref(), name.as_bytes()],
        program_id,
    )
}

/// Derive the schema PDA for one version of a named schema under a credential
pub fn find_schema_pda(
    program_id: &Pubkey,
    credential: &Pubkey,
    name: &str,
    version: u8,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SCHEMA_SEED, credential.as_ref(), name.as_bytes(), &[version]],
        program_id,
    )
}

/// Derive the attestation PDA
///
/// The nonce is an arbitrary key chosen by the issuer; it lets one
/// authority attest the same schema more than once.
pub fn find_attestation_pda(
    program_id: &Pubkey,
    credential: &Pubkey,
    authority: &Pubkey,
    schema: &Pubkey,
    nonce: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            ATTESTATION_SEED,
            credential.as_ref(),
            authority.as_ref(),
            schema.as_ref(),
            nonce.as_ref(),
        ],
        program_id,
    )
}

/// Derive the request PDA
pub fn find_request_pda(
    program_id: &Pubkey,
    credential: &Pubkey,
    schema: &Pubkey,
    nonce: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[REQUEST_SEED, credential.as_ref(), schema.as_ref(), nonce.as_ref()],
        program_id,
    )
}

/// Derive the event authority the program signs self-CPI events with
pub fn find_event_authority_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EVENT_AUTHORITY_SEED], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ATTESTATION_PROGRAM_ID;

    #[test]
    fn test_credential_pda_is_deterministic() {
        let authority = Pubkey::new_unique();
        let (first, bump) = find_credential_pda(&ATTESTATION_PROGRAM_ID, &authority, "test");
        let (second, _) = find_credential_pda(&ATTESTATION_PROGRAM_ID, &authority, "test");

        assert_eq!(first, second);
        let expected = Pubkey::create_program_address(
            &[b"credential", authority.as_ref(), b"test", &[bump]],
            &ATTESTATION_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_credential_pda_depends_on_name() {
        let authority = Pubkey::new_unique();
        let (a, _) = find_credential_pda(&ATTESTATION_PROGRAM_ID, &authority, "a");
        let (b, _) = find_credential_pda(&ATTESTATION_PROGRAM_ID, &authority, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_schema_pda_depends_on_version() {
        let credential = Pubkey::new_unique();
        let (v1, _) = find_schema_pda(&ATTESTATION_PROGRAM_ID, &credential, "kyc", 1);
        let (v2, _) = find_schema_pda(&ATTESTATION_PROGRAM_ID, &credential, "kyc", 2);
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_pdas_depend_on_program_id() {
        let other_program = Pubkey::new_unique();
        let (a, _) = find_event_authority_pda(&ATTESTATION_PROGRAM_ID);
        let (b, _) = find_event_authority_pda(&other_program);
        assert_ne!(a, b);
    }

    #[test]
    fn test_attestation_and_request_pdas_differ() {
        let credential = Pubkey::new_unique();
        let schema = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let nonce = Pubkey::new_unique();

        let (attestation, _) =
            find_attestation_pda(&ATTESTATION_PROGRAM_ID, &credential, &authority, &schema, &nonce);
        let (request, _) = find_request_pda(&ATTESTATION_PROGRAM_ID, &credential, &schema, &nonce);
        assert_ne!(attestation, request);
    }
}
