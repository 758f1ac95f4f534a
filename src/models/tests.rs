#[cfg(test)]
mod tests {
    use crate::models::abi::AbiDocument;
    use crate::models::instruction::InstructionAbi;
    use crate::models::program::{AccountRole, BuilderFunction, LegacyOpcodeEntry};
    use solana_pubkey::Pubkey;

    fn instruction(code: u64, name: &str, accounts: Option<Vec<AccountRole>>) -> InstructionAbi {
        let mut instruction = InstructionAbi::new(code, name.to_string());
        instruction.accounts = accounts;
        instruction
    }

    fn signer(name: &str) -> AccountRole {
        AccountRole::new(Some(name.to_string()), true, true)
    }

    #[test]
    fn test_abi_document_new() {
        let document = AbiDocument::new("token".to_string());

        assert_eq!(document.name, "token");
        assert_eq!(document.version, "0.1.0");
        assert!(document.instructions.is_empty());
        assert_eq!(document.metadata.origin, "unknown");
        assert_eq!(document.metadata.fingerprint.len(), 64);
    }

    #[test]
    fn test_add_instruction_sorts_by_code() {
        let mut document = AbiDocument::new("token".to_string());
        document.add_instruction(instruction(2, "Burn", None));
        document.add_instruction(instruction(0, "Init", None));
        document.add_instruction(instruction(1, "Mint", None));

        let codes: Vec<u64> = document.instructions.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![0, 1, 2]);
    }

    #[test]
    fn test_add_instruction_keeps_stored_accounts() {
        let mut document = AbiDocument::new("token".to_string());
        document.add_instruction(instruction(0, "Init", Some(vec![signer("payer")])));
        document.add_instruction(instruction(0, "Initialize", None));

        assert_eq!(document.instructions.len(), 1);
        assert_eq!(document.instructions[0].name, "Initialize");
        assert_eq!(document.instructions[0].accounts, Some(vec![signer("payer")]));
    }

    #[test]
    fn test_add_instruction_replaces_accounts() {
        let mut document = AbiDocument::new("token".to_string());
        document.add_instruction(instruction(0, "Init", Some(vec![signer("payer")])));
        document.add_instruction(instruction(0, "Init", Some(vec![signer("authority")])));

        assert_eq!(document.instructions[0].accounts, Some(vec![signer("authority")]));
    }

    #[test]
    fn test_merge_updates_fingerprint() {
        let mut stored = AbiDocument::new("token".to_string());
        stored.add_instruction(instruction(0, "Init", None));
        stored.refresh_fingerprint();
        let before = stored.metadata.fingerprint.clone();

        let mut incoming = AbiDocument::new("token".to_string());
        incoming.metadata.origin = "enum".to_string();
        incoming.add_instruction(instruction(1, "Close", None));
        stored.merge(incoming);

        assert_eq!(stored.instructions.len(), 2);
        assert_eq!(stored.metadata.origin, "enum");
        assert_ne!(stored.metadata.fingerprint, before);
    }

    #[test]
    fn test_merge_of_same_content_is_stable() {
        let mut stored = AbiDocument::new("token".to_string());
        stored.add_instruction(instruction(0, "Init", Some(vec![signer("payer")])));
        stored.refresh_fingerprint();
        let before = stored.metadata.fingerprint.clone();

        let mut incoming = AbiDocument::new("token".to_string());
        incoming.add_instruction(instruction(0, "Init", None));
        stored.merge(incoming);

        assert_eq!(stored.metadata.fingerprint, before);
        assert_eq!(stored.metadata.origin, "unknown");
    }

    #[test]
    fn test_account_role_to_account_meta() {
        let key = Pubkey::new_from_array([7u8; 32]);

        let writable = signer("payer").to_account_meta(&key);
        assert_eq!(writable.pubkey, key);
        assert!(writable.is_writable);
        assert!(writable.is_signer);

        let readonly = AccountRole::new(None, false, false).to_account_meta(&key);
        assert!(!readonly.is_writable);
        assert!(!readonly.is_signer);
    }

    #[test]
    fn test_legacy_numeric_code() {
        let entry = |code: &str| LegacyOpcodeEntry {
            code: code.to_string(),
            payload_struct_name: None,
        };

        assert_eq!(entry("2").numeric_code(), Some(2));
        assert_eq!(entry("02").numeric_code(), Some(2));
        assert_eq!(entry("0x1f").numeric_code(), Some(31));
        assert_eq!(entry("1_000").numeric_code(), Some(1000));
        assert_eq!(entry("7u8").numeric_code(), Some(7));
        assert_eq!(entry("0b11").numeric_code(), Some(3));
        assert_eq!(entry("0o17").numeric_code(), Some(15));
        assert_eq!(entry("0x0Au8").numeric_code(), Some(10));
        assert_eq!(entry("0b12").numeric_code(), None);
        assert_eq!(entry("7f32").numeric_code(), None);
        assert_eq!(entry("b'a'").numeric_code(), None);
    }

    #[test]
    fn test_builder_reference_matching() {
        let builder = BuilderFunction {
            name: "transfer".to_string(),
            produces_instruction_ref: Some("crate::instruction::Op::Transfer".to_string()),
            ..BuilderFunction::default()
        };

        assert!(builder.produces("Op", "Transfer"));
        assert!(!builder.produces("Other", "Transfer"));
        assert!(builder.produces_leaf("Transfer"));
        assert!(!BuilderFunction::default().produces_leaf("Transfer"));
    }
}
