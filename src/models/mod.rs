//! Interface description models for the attestation service program

pub mod account;
pub mod idl;
pub mod instruction;

pub use self::account::Account;
pub use self::idl::ProgramInterface;
pub use self::instruction::Instruction;

#[cfg(test)]
mod tests;
