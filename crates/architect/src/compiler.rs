// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prompt compiler.
//!
//! Turns a [`GenerationRequest`] into a system instruction plus a user
//! message, then asks the architect model for a draft.

use crate::error::Result;
use crate::fewshot::{format_examples, Example};
use crate::gateway::Gateway;
use crate::strategy::{DomainMode, StrategyTable, TargetStructure};
use architect_client::{LMConfig, LMRequest};

/// Opening lines of every compiled instruction.
pub const PERSONA_PREAMBLE: &str =
    "You are an Elite Prompt Engineer.\nGoal: Rewrite user request into a Master Prompt.";

/// Used in place of the few-shot block when no examples were supplied.
pub const INVENT_EXAMPLE: &str =
    "No examples provided. Invent one short, representative example and include it in the Master Prompt.";

/// Default sampling temperature for the draft call.
pub const DRAFT_TEMPERATURE: f32 = 0.6;

/// Everything the user submitted for one compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// What the user wants the prompt to do.
    pub raw_task: String,
    /// Supporting context, possibly empty.
    pub context_text: String,
    /// Domain rules to apply.
    pub domain: DomainMode,
    /// Layout of the resulting prompt.
    pub target: TargetStructure,
    /// Demonstrations, in order.
    pub examples: Vec<Example>,
    /// Run the critic stage after the draft.
    pub run_critic: bool,
    /// Run the compression stage last.
    pub run_compression: bool,
}

impl GenerationRequest {
    /// Start a request for `raw_task` with default settings.
    pub fn new(raw_task: impl Into<String>) -> Self {
        Self {
            raw_task: raw_task.into(),
            ..Default::default()
        }
    }

    /// Set the context text.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_text = context.into();
        self
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: DomainMode) -> Self {
        self.domain = domain;
        self
    }

    /// Set the target structure.
    pub fn with_target(mut self, target: TargetStructure) -> Self {
        self.target = target;
        self
    }

    /// Set the few-shot examples.
    pub fn with_examples(mut self, examples: Vec<Example>) -> Self {
        self.examples = examples;
        self
    }

    /// Enable or disable the critic stage.
    pub fn critic(mut self, enabled: bool) -> Self {
        self.run_critic = enabled;
        self
    }

    /// Enable or disable the compression stage.
    pub fn compression(mut self, enabled: bool) -> Self {
        self.run_compression = enabled;
        self
    }

    /// The user message sent with the compiled instruction.
    pub fn user_message(&self) -> String {
        format!("Task: {} Context: {}", self.raw_task, self.context_text)
    }
}

/// Compiled system instruction and user message for the draft call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt {
    /// System instruction.
    pub system: String,
    /// User message.
    pub user: String,
}

impl CompiledPrompt {
    /// Borrow as a two-message chat request.
    pub fn as_request(&self) -> LMRequest<'_> {
        LMRequest::instructed(self.system.as_str(), self.user.as_str())
    }
}

/// Compose the system instruction for `request`.
///
/// Exactly one domain fragment and one structure fragment are included.
pub fn compile(table: &StrategyTable, request: &GenerationRequest) -> CompiledPrompt {
    let strategy = table.select(request.domain, request.target);

    let examples = if request.examples.is_empty() {
        INVENT_EXAMPLE.to_string()
    } else {
        format_examples(&request.examples)
    };

    let mut system = String::with_capacity(
        PERSONA_PREAMBLE.len() + strategy.domain.len() + strategy.structure.len() + examples.len() + 64,
    );
    system.push_str(PERSONA_PREAMBLE);
    system.push_str("\nDomain: ");
    system.push_str(request.domain.label());
    system.push_str(". Rules: ");
    system.push_str(strategy.domain);
    system.push_str("\nStructure: ");
    system.push_str(strategy.structure);
    system.push_str("\nExamples:\n");
    system.push_str(&examples);

    CompiledPrompt {
        system,
        user: request.user_message(),
    }
}

/// Ask the architect model for a draft of the compiled prompt.
pub async fn draft(gateway: &Gateway, compiled: &CompiledPrompt, config: &LMConfig) -> Result<String> {
    tracing::debug!(model = %config.model, "requesting draft");
    let request = compiled.as_request().with_temperature(config.temperature);
    gateway.complete(request, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_client::MockProvider;
    use std::sync::Arc;

    #[test]
    fn test_compile_includes_one_fragment_each() {
        let table = StrategyTable::default();
        let request = GenerationRequest::new("scrape prices")
            .with_domain(DomainMode::Coding)
            .with_target(TargetStructure::MarkdownHeaders);

        let compiled = compile(&table, &request);
        assert!(compiled.system.starts_with(PERSONA_PREAMBLE));
        assert_eq!(compiled.system.matches("error handling").count(), 1);
        assert_eq!(compiled.system.matches("# Identity").count(), 1);
        assert!(!compiled.system.contains("Show Don't Tell"));
        assert!(!compiled.system.contains("<role>"));
    }

    #[test]
    fn test_compile_without_examples_asks_to_invent_one() {
        let compiled = compile(&StrategyTable::default(), &GenerationRequest::new("x"));
        assert!(compiled.system.contains(INVENT_EXAMPLE));
        assert!(!compiled.system.contains("<example>"));
    }

    #[test]
    fn test_compile_with_examples() {
        let request = GenerationRequest::new("x")
            .with_examples(vec![Example::new("Q1", "A1"), Example::new("Q2", "A2")]);
        let compiled = compile(&StrategyTable::default(), &request);
        assert!(compiled.system.contains("USER: Q1\nAI: A1"));
        assert!(compiled.system.contains("USER: Q2\nAI: A2"));
        assert!(!compiled.system.contains(INVENT_EXAMPLE));
    }

    #[test]
    fn test_compile_with_empty_table() {
        let request = GenerationRequest::new("x").with_domain(DomainMode::Legal);
        let compiled = compile(&StrategyTable::empty(), &request);
        assert!(compiled.system.contains("Domain: Legal. Rules: \n"));
        assert!(compiled.system.contains("Structure: \n"));
    }

    #[test]
    fn test_user_message() {
        let request = GenerationRequest::new("write a poem").with_context("about rust");
        assert_eq!(request.user_message(), "Task: write a poem Context: about rust");
    }

    #[tokio::test]
    async fn test_draft_sends_compiled_prompt() {
        let mock = Arc::new(MockProvider::fixed("DRAFT"));
        let gateway = Gateway::with_provider(mock.clone());
        let compiled = compile(&StrategyTable::default(), &GenerationRequest::new("t"));
        let config = LMConfig::for_model("llama-3.3-70b-versatile").with_temperature(DRAFT_TEMPERATURE);

        let text = draft(&gateway, &compiled, &config).await.unwrap();
        assert_eq!(text, "DRAFT");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, compiled.system);
        assert_eq!(calls[0].user, "Task: t Context: ");
        assert!((calls[0].temperature - 0.6).abs() < f32::EPSILON);
    }
}
