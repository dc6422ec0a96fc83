// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! REPL command system.
//!
//! Provides the Command trait and command registry for the REPL.

mod architect_cmd;
mod help;
mod login;
mod model;
mod request;
mod tools;
mod vault_cmd;

pub use architect_cmd::{ArchitectCommand, VarsCommand};
pub use help::{HelpCommand, QuitCommand};
pub use login::LoginCommand;
pub use model::{ConfigCommand, KeyCommand, ModelCommand};
pub use request::{
    CompressCommand, ContextCommand, CriticCommand, DomainCommand, ExamplesCommand, ShowCommand,
    TargetCommand, TaskCommand,
};
pub use tools::{ArenaCommand, ExportCommand, ReverseCommand, TranscribeCommand};
pub use vault_cmd::{SaveCommand, VaultCommand};

use super::SessionState;
use architect::{ArchitectConfig, Gateway, Vault};
use std::collections::HashMap;
use std::future::Future;
use tokio::runtime::Handle;

/// Output from a command.
#[derive(Debug)]
pub enum Output {
    /// Plain text output.
    Text(String),
    /// Success message.
    Success(String),
    /// Warning message.
    Warning(String),
    /// Error message.
    Error(String),
    /// Quit signal.
    Quit,
}

impl Output {
    /// Create a success output.
    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    /// Create a warning output.
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    /// Create an error output.
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// Create a text output.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

impl From<architect::Error> for Output {
    fn from(err: architect::Error) -> Self {
        Self::Error(err.to_string())
    }
}

/// Execution context for commands.
pub struct ExecutionContext<'a> {
    /// Runtime that drives network calls.
    pub runtime: &'a Handle,
    /// Resolved configuration.
    pub config: &'a ArchitectConfig,
    /// Vault file.
    pub vault: &'a Vault,
    /// Fixed gateway. When unset, one is built from the session key.
    pub gateway: Option<&'a Gateway>,
}

impl ExecutionContext<'_> {
    /// Gateway for the current session.
    pub fn gateway(&self, state: &SessionState) -> architect::Result<Gateway> {
        match self.gateway {
            Some(gateway) => Ok(gateway.clone()),
            None => Gateway::connect(state.api_key.as_deref(), &self.config.base_url),
        }
    }

    /// Run a future to completion on the session runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Command trait for REPL commands.
pub trait Command: Send + Sync {
    /// Command name (e.g., "architect").
    fn name(&self) -> &str;

    /// Command aliases (e.g., ["run", "go"]).
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Short description for help.
    fn description(&self) -> &str;

    /// Detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    /// Fixed argument values offered by tab completion.
    fn arguments(&self) -> &[&str] {
        &[]
    }

    /// Whether the argument is a file path.
    fn takes_path(&self) -> bool {
        false
    }

    /// Whether the session must be logged in.
    fn requires_auth(&self) -> bool {
        true
    }

    /// Whether the argument is a secret that must stay out of history.
    fn secret_argument(&self) -> bool {
        false
    }

    /// Execute the command.
    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output;
}

/// Command registry for looking up and executing commands.
pub struct CommandRegistry {
    /// Registered commands.
    commands: HashMap<String, Box<dyn Command>>,
    /// Alias to command name mapping.
    aliases: HashMap<String, String>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Create a registry with all default commands.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Request settings
        registry.register(Box::new(TaskCommand));
        registry.register(Box::new(ContextCommand));
        registry.register(Box::new(DomainCommand));
        registry.register(Box::new(TargetCommand));
        registry.register(Box::new(ExamplesCommand));
        registry.register(Box::new(CriticCommand));
        registry.register(Box::new(CompressCommand));
        registry.register(Box::new(ShowCommand));

        // Pipeline
        registry.register(Box::new(ArchitectCommand));
        registry.register(Box::new(VarsCommand));

        // Tools
        registry.register(Box::new(ArenaCommand));
        registry.register(Box::new(ReverseCommand));
        registry.register(Box::new(TranscribeCommand));
        registry.register(Box::new(ExportCommand));

        // Vault
        registry.register(Box::new(SaveCommand));
        registry.register(Box::new(VaultCommand));

        // Credentials and model
        registry.register(Box::new(LoginCommand));
        registry.register(Box::new(KeyCommand));
        registry.register(Box::new(ModelCommand));
        registry.register(Box::new(ConfigCommand));

        // Help commands
        registry.register(Box::new(HelpCommand));
        registry.register(Box::new(QuitCommand));

        registry
    }

    /// Register a command.
    pub fn register(&mut self, command: Box<dyn Command>) {
        let name = command.name().to_string();

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
        }

        self.commands.insert(name, command);
    }

    /// Look up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(cmd.as_ref());
        }

        if let Some(cmd_name) = self.aliases.get(name) {
            if let Some(cmd) = self.commands.get(cmd_name) {
                return Some(cmd.as_ref());
            }
        }

        None
    }

    /// Get all command names.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    /// Get all commands.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|b| b.as_ref())
    }
}

/// Read text given inline, or from a file when prefixed with `@`.
pub(crate) fn text_arg(args: &str) -> Result<String, String> {
    let args = args.trim();
    match args.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path.trim())
            .map(|s| s.trim_end().to_string())
            .map_err(|e| format!("Failed to read {}: {}", path.trim(), e)),
        None => Ok(args.to_string()),
    }
}

/// Parse `on`/`off` style arguments. Empty input flips `current`.
pub(crate) fn parse_toggle(args: &str, current: bool) -> Option<bool> {
    match args.trim().to_lowercase().as_str() {
        "" | "toggle" => Some(!current),
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for command tests.

    use super::*;
    use architect::gate::DEFAULT_SECRET;
    use architect_client::MockProvider;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Everything a command needs, backed by a mock provider.
    pub struct Harness {
        pub runtime: tokio::runtime::Runtime,
        pub config: ArchitectConfig,
        pub vault: Vault,
        pub gateway: Gateway,
        pub provider: Arc<MockProvider>,
        pub state: SessionState,
        _dir: TempDir,
    }

    impl Harness {
        pub fn new(provider: MockProvider) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = ArchitectConfig::default();
            let provider = Arc::new(provider);
            let gateway =
                Gateway::with_provider(provider.clone()).with_transcriber(provider.clone());
            let mut state = SessionState::from_config(&config);
            state.gate.attempt(DEFAULT_SECRET).unwrap();

            Self {
                runtime: tokio::runtime::Runtime::new().unwrap(),
                vault: Vault::new(dir.path().join("vault.json")),
                config,
                gateway,
                provider,
                state,
                _dir: dir,
            }
        }

        pub fn run(&mut self, command: &dyn Command, args: &str) -> Output {
            let handle = self.runtime.handle().clone();
            let mut ctx = ExecutionContext {
                runtime: &handle,
                config: &self.config,
                vault: &self.vault,
                gateway: Some(&self.gateway),
            };
            command.execute(args, &mut self.state, &mut ctx)
        }
    }
}
