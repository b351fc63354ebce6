//! Interface description output

use std::fs;
use std::path::Path;

use log::info;

use crate::errors::AttestationResult;
use crate::models::idl::ProgramInterface;

/// Render the interface description as pretty JSON
pub fn to_json(interface: &ProgramInterface) -> AttestationResult<String> {
    Ok(serde_json::to_string_pretty(interface)?)
}

/// Save the interface description to a file
pub fn save_interface(interface: &ProgramInterface, path: &Path) -> AttestationResult<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let json = to_json(interface)?;
    fs::write(path, json.as_bytes())?;
    info!("Wrote interface description ({} bytes) to {}", json.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ATTESTATION_PROGRAM_ID;
    use tempfile::tempdir;

    #[test]
    fn test_save_interface_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sas.json");
        let interface = ProgramInterface::attestation_service(&ATTESTATION_PROGRAM_ID);

        save_interface(&interface, &path).unwrap();

        let saved: ProgramInterface =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, interface);
    }
}
