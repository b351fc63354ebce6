//! On-chain account state of the attestation service program
//!
//! Every program-owned account starts with a one-byte discriminator followed
//! by the borsh encoding of its fields.

pub mod attestation;
pub mod credential;
pub mod discriminator;
pub mod layout;
pub mod request;
pub mod schema;

pub use self::attestation::Attestation;
pub use self::credential::Credential;
pub use self::discriminator::ProgramAccount;
pub use self::layout::{SchemaDataType, SchemaField, SchemaStruct, SchemaValue};
pub use self::request::Request;
pub use self::schema::Schema;

/// Byte offsets used to filter `getProgramAccounts` results
pub mod offsets {
    /// The discriminator, shared by every account type
    pub const DISCRIMINATOR: usize = 0;
    /// `Schema::credential`
    pub const SCHEMA_CREDENTIAL: usize = 1;
    /// `Attestation::credential`, after the discriminator and nonce
    pub const ATTESTATION_CREDENTIAL: usize = 33;
    /// `Attestation::schema`
    pub const ATTESTATION_SCHEMA: usize = 65;
}
