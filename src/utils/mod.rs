//! Utility functions and helpers

pub mod pda;

pub use self::pda::*;
