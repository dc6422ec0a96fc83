// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! REPL engine implementation.

use super::commands::{CommandRegistry, ExecutionContext, Output};
use super::completer::ReplCompleter;
use super::history::RedactedHistory;
use super::prompt::PromptBuilder;
use super::state::SessionState;
use architect::{ArchitectConfig, Vault};
use console::style;
use reedline::{
    Emacs, FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, Signal,
};
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::runtime::Handle;

/// The main REPL engine.
pub struct Repl {
    /// Current session state.
    state: SessionState,
    /// Command registry.
    commands: CommandRegistry,
    /// Resolved configuration.
    config: ArchitectConfig,
    /// Vault file.
    vault: Vault,
    /// Runtime for network calls.
    runtime: Handle,
    /// Line editor.
    editor: Reedline,
    /// Prompt builder.
    prompt_builder: PromptBuilder,
}

impl Repl {
    /// Create a REPL for `config`, driving network calls on `runtime`.
    ///
    /// Must not be called from inside an async context: commands block on
    /// `runtime` while they wait for the provider.
    pub fn new(config: ArchitectConfig, runtime: Handle) -> anyhow::Result<Self> {
        let commands = CommandRegistry::with_defaults();
        let completer = Box::new(ReplCompleter::new(&commands));

        let history_file = Self::history_file_path();
        if let Some(parent) = history_file.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let file_history = FileBackedHistory::with_file(1000, history_file)
            .map_err(|e| anyhow::anyhow!("Failed to create history: {}", e))?;
        let history = Box::new(RedactedHistory::new(file_history, &commands));

        let editor = Reedline::create()
            .with_history(history)
            .with_completer(completer)
            .with_edit_mode(Box::new(Emacs::default()));

        Ok(Self {
            state: SessionState::from_config(&config),
            vault: config.vault(),
            commands,
            config,
            runtime,
            editor,
            prompt_builder: PromptBuilder::new(),
        })
    }

    /// Get the history file path.
    fn history_file_path() -> PathBuf {
        directories::ProjectDirs::from("io", "lituus", "architect")
            .map(|dirs| dirs.data_dir().join("repl_history.txt"))
            .unwrap_or_else(|| PathBuf::from(".architect_history"))
    }

    /// Run the REPL loop.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.print_welcome();

        loop {
            let prompt = ReplPrompt::new(&self.prompt_builder, &self.state);

            match self.editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    match self.execute_line(line) {
                        Output::Quit => {
                            println!("{}", style("Goodbye!").dim());
                            break;
                        }
                        Output::Text(text) => println!("{}", text),
                        Output::Success(msg) => {
                            println!("{} {}", self.prompt_builder.success_indicator(), msg)
                        }
                        Output::Warning(msg) => {
                            println!("{} {}", self.prompt_builder.warning_indicator(), msg)
                        }
                        Output::Error(msg) => {
                            println!("{} {}", self.prompt_builder.error_indicator(), msg)
                        }
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("{}", style("Ctrl-C: Use 'quit' or Ctrl-D to exit").dim());
                }
                Ok(Signal::CtrlD) => {
                    println!("{}", style("Goodbye!").dim());
                    break;
                }
                Err(e) => {
                    eprintln!("{} {}", self.prompt_builder.error_indicator(), e);
                }
            }
        }

        Ok(())
    }

    /// Print the welcome message.
    fn print_welcome(&self) {
        println!();
        println!(
            "{}",
            style("╭─────────────────────────────────────────────────────────────╮").cyan()
        );
        println!(
            "{}  {} {}  {}",
            style("│").cyan(),
            style("Prompt Architect").bold().cyan(),
            style(format!("v{:<40}", env!("CARGO_PKG_VERSION"))).dim(),
            style("│").cyan()
        );
        println!(
            "{}  {}  {}",
            style("│").cyan(),
            style("Draft, critique, compress, test and store prompts       ").dim(),
            style("│").cyan()
        );
        println!(
            "{}  {}  {}",
            style("│").cyan(),
            style("Type 'help' for commands, 'quit' to exit                   ").dim(),
            style("│").cyan()
        );
        println!(
            "{}",
            style("╰─────────────────────────────────────────────────────────────╯").cyan()
        );
        if !self.state.gate.is_authenticated() {
            println!(
                "{}",
                style("Login required: use 'login <password>'").yellow()
            );
        }
        println!();
    }

    /// Execute a line of input.
    fn execute_line(&mut self, line: &str) -> Output {
        let (cmd_name, args) = line.split_once(' ').unwrap_or((line, ""));

        let command = match self.commands.get(cmd_name) {
            Some(cmd) => cmd,
            None => {
                return Output::error(format!(
                    "Unknown command: '{}'. Type 'help' for available commands.",
                    cmd_name
                ));
            }
        };

        if command.requires_auth() && !self.state.gate.is_authenticated() {
            return Output::error("Login required. Use 'login <password>'.");
        }

        let mut ctx = ExecutionContext {
            runtime: &self.runtime,
            config: &self.config,
            vault: &self.vault,
            gateway: None,
        };

        tracing::debug!(command = command.name(), "executing");
        command.execute(args, &mut self.state, &mut ctx)
    }
}

/// Custom prompt for the REPL.
struct ReplPrompt {
    prompt_str: String,
}

impl ReplPrompt {
    fn new(builder: &PromptBuilder, state: &SessionState) -> Self {
        Self {
            prompt_str: builder.build(state),
        }
    }
}

#[allow(clippy::all, warnings)] // Cow<str> lifetime pattern required by reedline Prompt trait
impl Prompt for ReplPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(&self.prompt_str)
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_wiring() {
        let registry = CommandRegistry::with_defaults();
        assert!(registry.get("help").is_some());
        assert!(registry.get("unknown_command_xyz").is_none());
        let _ = PromptBuilder::new();
    }

    #[test]
    fn test_prompt_renders_state() {
        let state = SessionState::from_config(&ArchitectConfig::default());
        let prompt = ReplPrompt::new(&PromptBuilder::new().without_colors(), &state);
        assert_eq!(prompt.render_prompt_left(), "architect [locked]> ");
    }
}
