use super::*;
use crate::constants::ATTESTATION_PROGRAM_ID;
use crate::state::offsets;

#[test]
fn test_interface_lists_every_instruction() {
    let interface = ProgramInterface::attestation_service(&ATTESTATION_PROGRAM_ID);

    assert_eq!(interface.address, ATTESTATION_PROGRAM_ID.to_string());
    assert_eq!(interface.instructions.len(), 9);
    assert_eq!(interface.metadata.origin, "pinocchio");

    let change = interface.instruction("changeSchemaDescription").unwrap();
    assert_eq!(change.discriminator, 4);
    let names: Vec<&str> = change.accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["payer", "authority", "credential", "schema", "systemProgram"]);
    assert!(change.accounts[4].is_optional);
    assert_eq!(change.args[0].name, "description");
    assert_eq!(change.args[0].ty, "string");
}

#[test]
fn test_account_offsets_match_filters() {
    let interface = ProgramInterface::attestation_service(&ATTESTATION_PROGRAM_ID);

    let attestation = interface.account("attestation").unwrap();
    assert_eq!(attestation.offset_of("credential"), Some(offsets::ATTESTATION_CREDENTIAL));
    assert_eq!(attestation.offset_of("schema"), Some(offsets::ATTESTATION_SCHEMA));
    assert_eq!(attestation.offset_of("signer"), None);

    let schema = interface.account("schema").unwrap();
    assert_eq!(schema.offset_of("credential"), Some(offsets::SCHEMA_CREDENTIAL));
}

#[test]
fn test_add_instruction_deduplicates() {
    let mut interface = ProgramInterface::new("p".to_string(), "addr".to_string());
    let spec = crate::instructions::change_schema_description::SPEC;

    interface.add_instruction(Instruction::from(&spec));
    interface.add_instruction(Instruction::from(&spec));
    assert_eq!(interface.instructions.len(), 1);
}

#[test]
fn test_interface_serializes_to_json() {
    let interface = ProgramInterface::attestation_service(&ATTESTATION_PROGRAM_ID);
    let json = serde_json::to_string(&interface).unwrap();
    let parsed: ProgramInterface = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, interface);
}
