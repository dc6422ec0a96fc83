// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Help and quit commands.

use super::{Command, CommandRegistry, ExecutionContext, Output};
use crate::repl::SessionState;
use console::style;

/// Help command - shows available commands.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["?", "h"]
    }

    fn description(&self) -> &str {
        "Show help for commands"
    }

    fn help(&self) -> &str {
        "Usage: help [command]\n\n\
         Without arguments, shows all available commands.\n\
         With a command name, shows detailed help for that command."
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn execute(
        &self,
        args: &str,
        _state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let args = args.trim();

        if args.is_empty() {
            return Output::text(format!(
                "{}\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}",
                style("PROMPT ARCHITECT COMMANDS").bold().underlined(),
                format!(
                    "{}\n  {} - Set the core task (or @file)\n  {} - Set supporting context\n  {} - Set domain (general, coding, creative, data, legal)\n  {} - Set target structure (xml, markdown, search)\n  {} - Load few-shot examples from CSV\n  {} - Toggle the critic stage\n  {} - Toggle the compression stage\n  {} - Show the pending request",
                    style("REQUEST").cyan().bold(),
                    style("task").green(),
                    style("context").green(),
                    style("domain").green(),
                    style("target").green(),
                    style("examples").green(),
                    style("critic").green(),
                    style("compress").green(),
                    style("show").green(),
                ),
                format!(
                    "{}\n  {} - Build the master prompt\n  {} - List and fill {{{{variables}}}}",
                    style("ARCHITECT").cyan().bold(),
                    style("architect").green(),
                    style("vars").green(),
                ),
                format!(
                    "{}\n  {} - Run a prompt against two models\n  {} - Infer the prompt behind an output\n  {} - Transcribe an audio file into the task\n  {} - Export as a Python script or curl command",
                    style("TOOLS").cyan().bold(),
                    style("arena").green(),
                    style("reverse").green(),
                    style("transcribe").green(),
                    style("export").green(),
                ),
                format!(
                    "{}\n  {} - Save the master prompt\n  {} - Browse saved prompts",
                    style("VAULT").cyan().bold(),
                    style("save").green(),
                    style("vault").green(),
                ),
                format!(
                    "{}\n  {} - Unlock the session\n  {} - Set the API key\n  {} - Set the architect model\n  {} - Show current configuration",
                    style("SESSION").cyan().bold(),
                    style("login").green(),
                    style("key").green(),
                    style("model").green(),
                    style("config").green(),
                ),
                format!(
                    "{}\n  {} - Show this help\n  {} - Exit the REPL",
                    style("HELP").cyan().bold(),
                    style("help").green(),
                    style("quit").green(),
                ),
            ));
        }

        let registry = CommandRegistry::with_defaults();
        match registry.get(args) {
            Some(cmd) => Output::text(format!(
                "{}\n\n{}",
                style(cmd.name()).green().bold(),
                cmd.help()
            )),
            None => Output::error(format!("Unknown command: '{}'", args)),
        }
    }
}

/// Quit command - exits the REPL.
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "q"]
    }

    fn description(&self) -> &str {
        "Exit the REPL"
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn execute(
        &self,
        _args: &str,
        _state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        Output::Quit
    }
}
