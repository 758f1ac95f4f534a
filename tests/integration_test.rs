use solana_abi_extractor::{analyze_json, extract_abi, models::abi::AbiDocument};
use serde_json::json;
use tempfile::tempdir;

fn ident(name: &str) -> serde_json::Value {
    json!({ "to_string": name })
}

fn path_ty(name: &str) -> serde_json::Value {
    json!({ "_type": "TypePath", "path": { "segments": [{ "ident": ident(name) }] } })
}

/// Instruction module with one enum, one payload struct and no builders
fn token_tree() -> serde_json::Value {
    json!({
        "_type": "File",
        "items": [
            {
                "_type": "ItemEnum",
                "vis": { "_type": "VisPublic" },
                "ident": ident("TokenInstruction"),
                "variants": [
                    { "_type": "Variant", "ident": ident("InitializeMint"),
                      "fields": { "_type": "FieldsUnnamed", "unnamed": [{ "ty": path_ty("MintArgs") }] } },
                    { "_type": "Variant", "ident": ident("Burn") }
                ]
            },
            {
                "_type": "ItemStruct",
                "vis": { "_type": "VisPublic" },
                "ident": ident("MintArgs"),
                "fields": { "_type": "FieldsNamed", "named": [
                    { "vis": { "_type": "VisPublic" }, "ident": ident("decimals"), "ty": path_ty("u8") },
                    { "vis": { "_type": "VisPublic" }, "ident": ident("supply"), "ty": path_ty("NonZeroU64") }
                ] }
            }
        ]
    })
}

#[test]
fn test_extract_abi_to_file() {
    let dir = tempdir().unwrap();
    let tree_path = dir.path().join("token.rs_parsed.json");
    std::fs::write(&tree_path, token_tree().to_string()).unwrap();
    let output_path = dir.path().join("abi").join("token.json");

    let document = extract_abi(&tree_path, "token", Some(&output_path)).unwrap();

    assert_eq!(document.name, "token");
    assert_eq!(document.metadata.origin, "enum");
    assert_eq!(document.metadata.instruction_enum.as_deref(), Some("TokenInstruction"));
    assert_eq!(document.instructions.len(), 2);
    assert_eq!(document.instructions[0].inputs[1].ty.as_deref(), Some("u64"));
    assert!(output_path.exists());

    let file_content = std::fs::read_to_string(&output_path).unwrap();
    let parsed: AbiDocument = serde_json::from_str(&file_content).unwrap();
    assert_eq!(parsed.instructions, document.instructions);
    assert_eq!(parsed.metadata.fingerprint, document.metadata.fingerprint);
}

#[test]
fn test_rerun_merges_into_stored_document() {
    let dir = tempdir().unwrap();
    let tree_path = dir.path().join("token.rs_parsed.json");
    std::fs::write(&tree_path, token_tree().to_string()).unwrap();
    let output_path = dir.path().join("token.json");

    let first = extract_abi(&tree_path, "token", Some(&output_path)).unwrap();
    let first_content = std::fs::read_to_string(&output_path).unwrap();

    let second = extract_abi(&tree_path, "token", Some(&output_path)).unwrap();
    let second_content = std::fs::read_to_string(&output_path).unwrap();

    assert_eq!(first.metadata.fingerprint, second.metadata.fingerprint);
    assert_eq!(first_content, second_content);
}

#[test]
fn test_analysis_output_is_identical_across_runs() {
    let json = token_tree().to_string();

    let first = serde_json::to_string(&analyze_json(&json).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze_json(&json).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_tree_is_an_error() {
    assert!(analyze_json("{ not json").is_err());

    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(extract_abi(&missing, "missing", None).is_err());
}

#[test]
fn test_tree_without_instructions_yields_empty_abi() {
    let json = json!({ "_type": "File", "items": [] }).to_string();
    let analysis = analyze_json(&json).unwrap();

    assert!(analysis.instructions.is_empty());
    assert_eq!(analysis.source.origin(), "unknown");
    assert!(!analysis.diagnostics.is_empty());
}

fn op_enum(second_variant: serde_json::Value) -> serde_json::Value {
    json!({
        "_type": "ItemEnum",
        "vis": { "_type": "VisPublic" },
        "ident": ident("Op"),
        "variants": [{ "_type": "Variant", "ident": ident("A") }, second_variant]
    })
}

#[test]
fn test_malformed_nodes_do_not_reject_the_tree() {
    let variant_b = json!({ "_type": "Variant", "ident": ident("B") });
    let trees = vec![
        json!({ "_type": "File", "items": [op_enum(variant_b.clone()), { "_type": "ItemStruct", "ident": null }] }),
        json!({ "_type": "File", "items": [op_enum(variant_b.clone()), { "ident": ident("Untagged") }] }),
        json!({ "_type": "File", "items": [op_enum(variant_b.clone()), { "_type": "ItemStruct", "vis": {}, "ident": ident("S") }] }),
        json!({ "_type": "File", "items": [op_enum(json!({ "_type": "Variant", "ident": ident("B"), "fields": null }))] }),
    ];

    for tree in trees {
        let analysis = analyze_json(&tree.to_string()).unwrap();
        let names: Vec<&str> = analysis.instructions.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"], "tree: {}", tree);
    }
}
