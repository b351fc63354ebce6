//! Account structure metadata for the interface description

use serde::{Deserialize, Serialize};

/// Represents a program account structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Account name
    pub name: String,
    /// Leading discriminator byte
    pub discriminator: u8,
    /// Account fields
    pub fields: Vec<AccountField>,
}

/// Represents an account field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountField {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub ty: String,
    /// Field offset in the account data; unknown once a variable-length field precedes it
    pub offset: Option<usize>,
}

/// Encoded size of a fixed-size field type
fn fixed_size(ty: &str) -> Option<usize> {
    match ty {
        "u8" | "bool" => Some(1),
        "i64" => Some(8),
        "publicKey" => Some(32),
        _ => None,
    }
}

impl Account {
    /// Create a new account
    pub fn new(name: String, discriminator: u8) -> Self {
        Self {
            name,
            discriminator,
            fields: Vec::new(),
        }
    }

    /// Add a field after the existing ones, computing its offset
    pub fn add_field(&mut self, name: &str, ty: &str) {
        let offset = match self.fields.last() {
            // the discriminator occupies byte 0
            None => Some(1),
            Some(last) => last
                .offset
                .zip(fixed_size(&last.ty))
                .map(|(offset, size)| offset + size),
        };
        self.fields.push(AccountField {
            name: name.to_string(),
            ty: ty.to_string(),
            offset,
        });
    }

    /// Offset of a named field, if fixed
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().find(|f| f.name == name).and_then(|f| f.offset)
    }
}
