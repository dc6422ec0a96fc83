// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Tests for the vault, arena, reverse engineer and variable wizard.

use architect::{
    duel, extract_variables, fill_variables, reverse_engineer, DomainMode, Gateway, Vault,
    VaultEntry,
};
use architect_client::{LMConfig, MockProvider};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_vault_most_recent_first() {
    let dir = tempdir().unwrap();
    let vault = Vault::new(dir.path().join("prompt_vault.json"));

    let e1 = VaultEntry::for_domain("E1", DomainMode::Coding);
    let e2 = VaultEntry::for_domain("E2", DomainMode::Legal);
    vault.append(e1.clone()).unwrap();
    vault.append(e2.clone()).unwrap();

    assert_eq!(vault.load_all(), vec![e2, e1]);
}

#[test]
fn test_vault_reads_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prompt_vault.json");
    std::fs::write(
        &path,
        r#"[{"timestamp": "2024-05-01 09:30", "prompt": "old", "tags": "Coding", "score": "N/A"}]"#,
    )
    .unwrap();

    let vault = Vault::new(&path);
    let entries = vault.append(VaultEntry::new("new", "General")).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].prompt, "new");
    assert_eq!(entries[1].timestamp, "2024-05-01 09:30");
}

#[test]
fn test_vault_corrupt_file_is_replaced_on_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prompt_vault.json");
    std::fs::write(&path, "not json at all").unwrap();

    let vault = Vault::new(&path);
    assert!(vault.load_all().is_empty());

    vault.append(VaultEntry::new("fresh", "General")).unwrap();
    assert_eq!(vault.load_all().len(), 1);
}

#[tokio::test]
async fn test_arena_failure_isolated() {
    let provider = Arc::new(
        MockProvider::new(|call| format!("{}: ok", call.model))
            .fail_on_model("llama-3.3-70b-versatile"),
    );
    let gateway = Gateway::with_provider(provider.clone());

    let result = duel(
        &gateway,
        "Explain TCP",
        "llama-3.3-70b-versatile",
        "mixtral-8x7b-32768",
    )
    .await;

    assert!(result.a.result.is_err());
    assert_eq!(result.b.result.unwrap(), "mixtral-8x7b-32768: ok");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_reverse_engineer_roundtrip() {
    let provider = Arc::new(MockProvider::fixed("Act as a sommelier."));
    let gateway = Gateway::with_provider(provider);

    let prompt = reverse_engineer(&gateway, "This Merlot sings.", &LMConfig::default())
        .await
        .unwrap();
    assert_eq!(prompt, "Act as a sommelier.");
}

#[test]
fn test_variable_wizard() {
    let prompt = "Hi {{a}}, {{b}}, {{a}} again";
    let names = extract_variables(prompt);
    assert_eq!(names, vec!["a", "b"]);

    let values: HashMap<String, String> = names
        .iter()
        .map(|n| (n.clone(), n.to_uppercase()))
        .collect();
    assert_eq!(fill_variables(prompt, &values), "Hi A, B, A again");
}
