// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! End-to-end tests for the compile → critic → compression chain.
//!
//! All calls go to in-process providers; nothing touches the network.

use architect::compiler::INVENT_EXAMPLE;
use architect::refine::{COMPRESSION_INSTRUCTION, CRITIC_RUBRIC, CRITIQUE_NOTE};
use architect::{
    fewshot, ArchitectConfig, DomainMode, Error, Example, Gateway, GenerationRequest, Pipeline,
    TargetStructure,
};
use architect_client::{FailingProvider, MockProvider};
use std::sync::Arc;

fn staged_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::new(|call| {
        if call.system == CRITIC_RUBRIC {
            format!("[critic] {}", call.user)
        } else if call.system == COMPRESSION_INSTRUCTION {
            format!("[short] {}", call.user)
        } else {
            "Master prompt with {{audience}} and {{tone}}".to_string()
        }
    }))
}

/// Stages disabled: the final text is the draft, untouched.
#[tokio::test]
async fn test_final_equals_draft_without_stages() {
    let provider = staged_provider();
    let pipeline = Pipeline::new(Gateway::with_provider(provider.clone()));

    let result = pipeline.run(&GenerationRequest::new("task")).await.unwrap();

    assert_eq!(result.final_text, result.draft);
    assert!(result.critique_note.is_none());
    assert_eq!(provider.call_count(), 1);
}

/// Each enabled stage replaces the text with its full output.
#[tokio::test]
async fn test_each_stage_overwrites() {
    let provider = staged_provider();
    let pipeline = Pipeline::new(Gateway::with_provider(provider.clone()));

    let critic_only = pipeline
        .run(&GenerationRequest::new("task").critic(true))
        .await
        .unwrap();
    assert_eq!(critic_only.final_text, format!("[critic] {}", critic_only.draft));
    assert_eq!(critic_only.critique_note.as_deref(), Some(CRITIQUE_NOTE));

    let compress_only = pipeline
        .run(&GenerationRequest::new("task").compression(true))
        .await
        .unwrap();
    assert_eq!(compress_only.final_text, format!("[short] {}", compress_only.draft));
    assert!(compress_only.critique_note.is_none());
}

/// The compression stage sees the critic's output, not the draft.
#[tokio::test]
async fn test_compression_follows_critic() {
    let provider = staged_provider();
    let pipeline = Pipeline::new(Gateway::with_provider(provider.clone()));

    let result = pipeline
        .run(&GenerationRequest::new("task").critic(true).compression(true))
        .await
        .unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].user, result.draft);
    assert_eq!(calls[2].user, format!("[critic] {}", result.draft));
    assert_eq!(result.final_text, format!("[short] [critic] {}", result.draft));
}

/// A failing stage aborts the run; no partial result is produced.
#[tokio::test]
async fn test_failing_critic_aborts() {
    let provider = Arc::new(
        MockProvider::fixed("draft").fail_on_model(architect::refine::DEFAULT_REFINER_MODEL),
    );
    let pipeline = Pipeline::new(Gateway::with_provider(provider));

    let err = pipeline
        .run(&GenerationRequest::new("task").critic(true))
        .await
        .unwrap_err();
    assert!(err.is_service_error());
}

#[tokio::test]
async fn test_provider_down() {
    let pipeline = Pipeline::new(Gateway::with_provider(Arc::new(FailingProvider::new(
        "connection refused",
    ))));
    let err = pipeline.run(&GenerationRequest::new("task")).await.unwrap_err();
    assert!(matches!(err, Error::Service(ref msg) if msg.contains("connection refused")));
}

/// Missing credential fails before any provider exists to call.
#[test]
fn test_missing_credential_short_circuits() {
    let config = ArchitectConfig::default();
    let err = config.gateway().unwrap_err();
    assert!(err.is_configuration_error());
}

/// CSV examples reach the system instruction in order.
#[tokio::test]
async fn test_csv_examples_flow_into_instruction() {
    let csv = "Input,Output\nWhat is 2+2?,4\nCapital of France?,Paris\n";
    let examples = fewshot::load_csv(csv.as_bytes()).unwrap();

    let provider = staged_provider();
    let pipeline = Pipeline::new(Gateway::with_provider(provider.clone()));
    let request = GenerationRequest::new("quiz bot")
        .with_context("for kids")
        .with_domain(DomainMode::Creative)
        .with_target(TargetStructure::MarkdownHeaders)
        .with_examples(examples);

    pipeline.run(&request).await.unwrap();

    let call = &provider.calls()[0];
    let first = call.system.find("USER: What is 2+2?\nAI: 4").unwrap();
    let second = call.system.find("USER: Capital of France?\nAI: Paris").unwrap();
    assert!(first < second);
    assert!(!call.system.contains(INVENT_EXAMPLE));
    assert!(call.system.contains("Show Don't Tell"));
    assert!(call.system.contains("# Identity"));
    assert_eq!(call.user, "Task: quiz bot Context: for kids");
}

/// A bad upload yields no examples, and the compile falls back to
/// inventing one.
#[tokio::test]
async fn test_bad_csv_falls_back_to_invented_example() {
    let examples: Vec<Example> =
        fewshot::load_csv("Question,Answer\nq,a\n".as_bytes()).unwrap_or_default();
    assert!(examples.is_empty());

    let provider = staged_provider();
    let pipeline = Pipeline::new(Gateway::with_provider(provider.clone()));
    pipeline
        .run(&GenerationRequest::new("t").with_examples(examples))
        .await
        .unwrap();

    assert!(provider.calls()[0].system.contains(INVENT_EXAMPLE));
}

/// Configured fragment overrides reach the compiled instruction.
#[tokio::test]
async fn test_config_overrides_reach_compiler() {
    let config = ArchitectConfig::from_yaml("domains:\n  legal: Cite the statute.\n").unwrap();
    let provider = staged_provider();
    let pipeline = config.pipeline(Gateway::with_provider(provider.clone()));

    pipeline
        .run(&GenerationRequest::new("t").with_domain(DomainMode::Legal))
        .await
        .unwrap();

    let call = &provider.calls()[0];
    assert!(call.system.contains("Rules: Cite the statute."));
    assert_eq!(call.model, config.architect_model);
}
