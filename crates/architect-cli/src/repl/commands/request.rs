// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Commands that edit the pending request.

use super::{on_off, parse_toggle, text_arg, Command, ExecutionContext, Output};
use crate::repl::SessionState;
use architect::{fewshot, DomainMode, TargetStructure};
use console::style;

/// Task command - set the core task.
pub struct TaskCommand;

impl Command for TaskCommand {
    fn name(&self) -> &str {
        "task"
    }

    fn aliases(&self) -> &[&str] {
        &["t"]
    }

    fn description(&self) -> &str {
        "Set the core task"
    }

    fn help(&self) -> &str {
        "Usage: task <text> | task @<file> | task clear\n\n\
         Set what the prompt should accomplish. Without a task, the last\n\
         voice transcript is used.\n\n\
         Examples:\n\
           task Write a python script to scrape prices\n\
           task @brief.txt"
    }

    fn takes_path(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        match args.trim() {
            "" => match state.effective_task() {
                Some(task) => Output::text(format!("Current task: {}", task)),
                None => Output::warning("No task set. Usage: task <text>"),
            },
            "clear" => {
                state.task.clear();
                Output::success("Task cleared")
            }
            _ => match text_arg(args) {
                Ok(text) => {
                    state.task = text;
                    Output::success(format!("Task set ({} chars)", state.task.len()))
                }
                Err(e) => Output::error(e),
            },
        }
    }
}

/// Context command - set supporting context.
pub struct ContextCommand;

impl Command for ContextCommand {
    fn name(&self) -> &str {
        "context"
    }

    fn aliases(&self) -> &[&str] {
        &["ctx"]
    }

    fn description(&self) -> &str {
        "Set supporting context"
    }

    fn help(&self) -> &str {
        "Usage: context <text> | context @<file> | context clear"
    }

    fn takes_path(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        match args.trim() {
            "" if state.context.is_empty() => Output::text("No context set."),
            "" => Output::text(format!("Current context: {}", state.context)),
            "clear" => {
                state.context.clear();
                Output::success("Context cleared")
            }
            _ => match text_arg(args) {
                Ok(text) => {
                    state.context = text;
                    Output::success("Context set")
                }
                Err(e) => Output::error(e),
            },
        }
    }
}

/// Domain command - pick the domain rules.
pub struct DomainCommand;

impl Command for DomainCommand {
    fn name(&self) -> &str {
        "domain"
    }

    fn aliases(&self) -> &[&str] {
        &["d"]
    }

    fn description(&self) -> &str {
        "Set the domain (general, coding, creative, data, legal)"
    }

    fn arguments(&self) -> &[&str] {
        &["general", "coding", "creative", "data", "legal"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        if args.trim().is_empty() {
            return Output::text(format!("Current domain: {}", state.domain));
        }

        match args.parse::<DomainMode>() {
            Ok(domain) => {
                state.domain = domain;
                Output::success(format!("Domain set: {}", domain))
            }
            Err(e) => e.into(),
        }
    }
}

/// Target command - pick the output structure.
pub struct TargetCommand;

impl Command for TargetCommand {
    fn name(&self) -> &str {
        "target"
    }

    fn aliases(&self) -> &[&str] {
        &["structure"]
    }

    fn description(&self) -> &str {
        "Set the target structure (xml, markdown, search)"
    }

    fn arguments(&self) -> &[&str] {
        &["xml", "markdown", "search"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        if args.trim().is_empty() {
            return Output::text(format!("Current target: {}", state.target));
        }

        match args.parse::<TargetStructure>() {
            Ok(target) => {
                state.target = target;
                Output::success(format!("Target set: {}", target))
            }
            Err(e) => e.into(),
        }
    }
}

/// Examples command - manage few-shot examples.
pub struct ExamplesCommand;

impl Command for ExamplesCommand {
    fn name(&self) -> &str {
        "examples"
    }

    fn aliases(&self) -> &[&str] {
        &["ex"]
    }

    fn description(&self) -> &str {
        "Manage few-shot examples (load/list/clear)"
    }

    fn help(&self) -> &str {
        "Usage: examples [list] | examples load <file.csv> | examples clear\n\n\
         The CSV needs 'Input' and 'Output' columns. A bad file clears\n\
         the examples rather than loading part of it."
    }

    fn arguments(&self) -> &[&str] {
        &["load", "list", "clear"]
    }

    fn takes_path(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let args = args.trim();
        let (sub, rest) = args.split_once(' ').unwrap_or((args, ""));

        match sub {
            "" | "list" => {
                if state.examples.is_empty() {
                    return Output::text("No examples loaded.");
                }
                let mut out = format!("{} examples:\n", state.examples.len());
                for (i, ex) in state.examples.iter().enumerate() {
                    out.push_str(&format!(
                        "  [{}] {} {}\n      {} {}\n",
                        i,
                        style("USER:").cyan(),
                        ex.input,
                        style("AI:").green(),
                        ex.output
                    ));
                }
                Output::text(out.trim_end())
            }
            "load" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Output::error("Usage: examples load <file.csv>");
                }
                match fewshot::load_csv_path(path) {
                    Ok(examples) => {
                        state.examples = examples;
                        Output::success(format!("Loaded {} examples", state.examples.len()))
                    }
                    Err(e) => {
                        state.examples.clear();
                        Output::error(format!(
                            "{}. Ensure columns are 'Input' and 'Output'.",
                            e
                        ))
                    }
                }
            }
            "clear" => {
                state.examples.clear();
                Output::success("Examples cleared")
            }
            other => Output::error(format!(
                "Unknown subcommand: '{}'. Use load, list or clear.",
                other
            )),
        }
    }
}

/// Critic command - toggle the critic stage.
pub struct CriticCommand;

impl Command for CriticCommand {
    fn name(&self) -> &str {
        "critic"
    }

    fn description(&self) -> &str {
        "Toggle the critic stage (on/off)"
    }

    fn arguments(&self) -> &[&str] {
        &["on", "off"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        match parse_toggle(args, state.run_critic) {
            Some(value) => {
                state.run_critic = value;
                Output::success(format!("Critic: {}", on_off(value)))
            }
            None => Output::error("Usage: critic [on|off]"),
        }
    }
}

/// Compress command - toggle the compression stage.
pub struct CompressCommand;

impl Command for CompressCommand {
    fn name(&self) -> &str {
        "compress"
    }

    fn aliases(&self) -> &[&str] {
        &["diet"]
    }

    fn description(&self) -> &str {
        "Toggle the compression stage (on/off)"
    }

    fn arguments(&self) -> &[&str] {
        &["on", "off"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        match parse_toggle(args, state.run_compression) {
            Some(value) => {
                state.run_compression = value;
                Output::success(format!("Compression: {}", on_off(value)))
            }
            None => Output::error("Usage: compress [on|off]"),
        }
    }
}

/// Show command - display the pending request.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["s"]
    }

    fn description(&self) -> &str {
        "Show the pending request and last result"
    }

    fn execute(
        &self,
        _args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let mut out = String::new();

        out.push_str(&format!("{}\n", style("REQUEST").cyan().bold()));
        out.push_str(&format!(
            "  Task:        {}\n",
            state.effective_task().unwrap_or("(none)")
        ));
        if !state.context.is_empty() {
            out.push_str(&format!("  Context:     {}\n", state.context));
        }
        out.push_str(&format!("  Domain:      {}\n", state.domain));
        out.push_str(&format!("  Target:      {}\n", state.target));
        out.push_str(&format!("  Examples:    {}\n", state.examples.len()));
        out.push_str(&format!("  Critic:      {}\n", on_off(state.run_critic)));
        out.push_str(&format!("  Compression: {}\n", on_off(state.run_compression)));
        out.push_str(&format!("  Variables:   {}\n", on_off(state.extract_vars)));

        if let Some(prompt) = &state.master_prompt {
            out.push_str(&format!("\n{}\n", style("MASTER PROMPT").cyan().bold()));
            out.push_str(prompt);
        }

        Output::text(out.trim_end())
    }
}
