// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! REPL session state.

use architect::{
    AccessGate, ArchitectConfig, DomainMode, Example, GenerationRequest, PipelineResult,
    TargetStructure,
};
use std::collections::HashMap;

/// Everything one REPL session remembers.
///
/// Created when the REPL starts and dropped when it exits. Fields change
/// only through explicit commands.
#[derive(Debug)]
pub struct SessionState {
    /// Access gate for this session.
    pub gate: AccessGate,
    /// Provider API key.
    pub api_key: Option<String>,
    /// Model used for drafts, the reverse engineer and exports.
    pub architect_model: String,
    /// Core task text.
    pub task: String,
    /// Supporting context.
    pub context: String,
    /// Selected domain.
    pub domain: DomainMode,
    /// Selected target structure.
    pub target: TargetStructure,
    /// Few-shot examples.
    pub examples: Vec<Example>,
    /// Run the critic after drafting.
    pub run_critic: bool,
    /// Run compression last.
    pub run_compression: bool,
    /// List placeholders after each run.
    pub extract_vars: bool,
    /// Arena contenders.
    pub arena_models: (String, String),
    /// Last draft.
    pub draft: Option<String>,
    /// Note left by the critic on the last run.
    pub critique_note: Option<String>,
    /// Last final prompt.
    pub master_prompt: Option<String>,
    /// Last voice transcript.
    pub transcript: Option<String>,
    /// Values entered for placeholders.
    pub variables: HashMap<String, String>,
}

impl SessionState {
    /// Fresh, locked session seeded from `config`.
    pub fn from_config(config: &ArchitectConfig) -> Self {
        Self {
            gate: config.access_gate(),
            api_key: config.api_key.clone(),
            architect_model: config.architect_model.clone(),
            task: String::new(),
            context: String::new(),
            domain: DomainMode::default(),
            target: TargetStructure::default(),
            examples: Vec::new(),
            run_critic: true,
            run_compression: false,
            extract_vars: true,
            arena_models: (config.arena_model_a.clone(), config.arena_model_b.clone()),
            draft: None,
            critique_note: None,
            master_prompt: None,
            transcript: None,
            variables: HashMap::new(),
        }
    }

    /// Task to compile: the typed task, else the last transcript.
    pub fn effective_task(&self) -> Option<&str> {
        let task = self.task.trim();
        if !task.is_empty() {
            return Some(task);
        }
        self.transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Build a request from the current settings, if there is a task.
    pub fn generation_request(&self) -> Option<GenerationRequest> {
        let task = self.effective_task()?;
        Some(
            GenerationRequest::new(task)
                .with_context(self.context.clone())
                .with_domain(self.domain)
                .with_target(self.target)
                .with_examples(self.examples.clone())
                .critic(self.run_critic)
                .compression(self.run_compression),
        )
    }

    /// Store the outcome of a successful run.
    pub fn apply_result(&mut self, result: PipelineResult) {
        self.draft = Some(result.draft);
        self.critique_note = result.critique_note;
        self.master_prompt = Some(result.final_text);
        self.variables.clear();
    }
}
