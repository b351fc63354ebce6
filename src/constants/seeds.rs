//! Seed prefixes for program-derived addresses

pub const CREDENTIAL_SEED: &[u8] = b"credential";
pub const SCHEMA_SEED: &[u8] = b"schema";
pub const ATTESTATION_SEED: &[u8] = b"attestation";
pub const REQUEST_SEED: &[u8] = b"request";
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";
