// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Credential and model commands.

use super::{Command, ExecutionContext, Output};
use crate::repl::SessionState;
use console::style;

/// Model command - set the architect model.
pub struct ModelCommand;

impl Command for ModelCommand {
    fn name(&self) -> &str {
        "model"
    }

    fn aliases(&self) -> &[&str] {
        &["m"]
    }

    fn description(&self) -> &str {
        "Set the architect model"
    }

    fn help(&self) -> &str {
        "Usage: model <name>\n\n\
         Set the model used for drafts, reverse engineering and exports.\n\
         The critic and compression stages use the refiner model from\n\
         the configuration.\n\n\
         Examples:\n\
           model llama-3.3-70b-versatile\n\
           model llama-3.1-8b-instant"
    }

    fn arguments(&self) -> &[&str] {
        &["llama-3.3-70b-versatile", "llama-3.1-8b-instant"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let args = args.trim();

        if args.is_empty() {
            return Output::text(format!("Current model: {}", state.architect_model));
        }

        state.architect_model = args.to_string();
        Output::success(format!("Model set: {}", args))
    }
}

/// Key command - set the provider API key.
pub struct KeyCommand;

impl Command for KeyCommand {
    fn name(&self) -> &str {
        "key"
    }

    fn description(&self) -> &str {
        "Set the provider API key"
    }

    fn help(&self) -> &str {
        "Usage: key <api-key> | key clear\n\n\
         The key is kept for this session only."
    }

    fn secret_argument(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        match args.trim() {
            "" => match &state.api_key {
                Some(key) => Output::text(format!("API key: {}", mask(key))),
                None => Output::warning("No API key set. Usage: key <api-key>"),
            },
            "clear" => {
                state.api_key = None;
                Output::success("API key cleared")
            }
            key => {
                state.api_key = Some(key.to_string());
                Output::success("API key set")
            }
        }
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{}", tail)
}

/// Config command - show the resolved configuration.
pub struct ConfigCommand;

impl Command for ConfigCommand {
    fn name(&self) -> &str {
        "config"
    }

    fn aliases(&self) -> &[&str] {
        &["cfg"]
    }

    fn description(&self) -> &str {
        "Show the current configuration"
    }

    fn execute(
        &self,
        _args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let config = ctx.config;
        let mut out = String::new();

        out.push_str(&format!("{}\n", style("CONFIGURATION").cyan().bold()));
        out.push_str(&format!("  Endpoint:       {}\n", config.base_url));
        out.push_str(&format!(
            "  API key:        {}\n",
            state.api_key.as_deref().map(mask).unwrap_or_else(|| "(not set)".into())
        ));
        out.push_str(&format!("  Architect:      {}\n", state.architect_model));
        out.push_str(&format!("  Refiner:        {}\n", config.refiner_model));
        out.push_str(&format!("  Temperature:    {}\n", config.temperature));
        out.push_str(&format!(
            "  Arena:          {} vs {}\n",
            state.arena_models.0, state.arena_models.1
        ));
        out.push_str(&format!("  Transcription:  {}\n", config.transcription_model));
        out.push_str(&format!("  Vault:          {}\n", ctx.vault.path().display()));

        Output::text(out.trim_end())
    }
}
