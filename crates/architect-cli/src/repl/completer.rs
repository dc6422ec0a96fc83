// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Tab completion for the REPL.

use super::CommandRegistry;
use reedline::{Completer, Span, Suggestion};
use std::collections::HashMap;

/// What a command accepts after its name.
#[derive(Debug, Clone, Default)]
struct ArgSpec {
    values: Vec<String>,
    paths: bool,
}

/// REPL tab completer.
pub struct ReplCompleter {
    /// Owned copy of command names.
    command_names: Vec<String>,
    /// Argument specs keyed by name and alias.
    args: HashMap<String, ArgSpec>,
}

impl ReplCompleter {
    /// Create a new completer from a command registry.
    pub fn new(registry: &CommandRegistry) -> Self {
        let mut command_names: Vec<String> = registry
            .command_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        command_names.sort();

        let mut args = HashMap::new();
        for cmd in registry.commands() {
            let spec = ArgSpec {
                values: cmd.arguments().iter().map(|s| s.to_string()).collect(),
                paths: cmd.takes_path(),
            };
            for alias in cmd.aliases() {
                args.insert(alias.to_string(), spec.clone());
            }
            args.insert(cmd.name().to_string(), spec);
        }

        Self {
            command_names,
            args,
        }
    }

    /// Get completions for the current input.
    fn complete_command(&self, partial: &str) -> Vec<String> {
        self.command_names
            .iter()
            .filter(|name| name.starts_with(partial))
            .cloned()
            .collect()
    }

    /// Complete the argument of `command`.
    fn complete_argument(&self, command: &str, partial: &str) -> Vec<String> {
        let Some(spec) = self.args.get(command) else {
            return vec![];
        };

        let mut values: Vec<String> = spec
            .values
            .iter()
            .filter(|v| v.starts_with(partial))
            .cloned()
            .collect();

        if spec.paths {
            let path = partial.strip_prefix('@').unwrap_or(partial);
            let prefix = if partial.starts_with('@') { "@" } else { "" };
            values.extend(
                PathCompleter::complete(path)
                    .into_iter()
                    .map(|p| format!("{}{}", prefix, p)),
            );
        }

        values
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        let (word_start, partial) = if line_to_cursor.ends_with(' ') {
            // Cursor after space - completing new word
            (pos, "")
        } else if let Some(last_word) = words.last() {
            let start = line_to_cursor.rfind(last_word).unwrap_or(0);
            (start, *last_word)
        } else {
            (0, "")
        };

        let span = Span::new(word_start, pos);

        let values = if words.len() <= 1 && !line_to_cursor.ends_with(' ') {
            self.complete_command(partial)
        } else {
            let arg_index = if line_to_cursor.ends_with(' ') {
                words.len()
            } else {
                words.len() - 1
            };
            // Only the first argument is completed, except for subcommands
            // that take a path ("examples load <file>").
            match (arg_index, words.first()) {
                (1, Some(cmd)) => self.complete_argument(cmd, partial),
                (2, Some(cmd)) if self.args.get(*cmd).is_some_and(|s| s.paths) => {
                    PathCompleter::complete(partial)
                }
                _ => vec![],
            }
        };

        values
            .into_iter()
            .map(|value| Suggestion {
                append_whitespace: !value.ends_with('/'),
                value,
                span,
                ..Default::default()
            })
            .collect()
    }
}

/// Simple completer that completes file paths.
pub struct PathCompleter;

impl PathCompleter {
    /// Complete a partial path.
    pub fn complete(partial: &str) -> Vec<String> {
        use std::fs;
        use std::path::Path;

        let path = Path::new(partial);

        // Determine directory to list
        let (dir, prefix) = if partial.is_empty() {
            (".".into(), String::new())
        } else if partial.ends_with('/') || partial.ends_with('\\') {
            (path.to_path_buf(), String::new())
        } else if let Some(parent) = path.parent() {
            let prefix = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            (
                if parent.as_os_str().is_empty() {
                    ".".into()
                } else {
                    parent.to_path_buf()
                },
                prefix,
            )
        } else {
            (".".into(), partial.to_string())
        };

        let entries = match fs::read_dir(&dir) {
            Ok(e) => e,
            Err(_) => return vec![],
        };

        let mut completions = Vec::new();

        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(&prefix) && !name.starts_with('.') {
                    let mut completion = if dir.as_os_str() == "." {
                        name.to_string()
                    } else {
                        dir.join(name).to_string_lossy().to_string()
                    };

                    if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                        completion.push('/');
                    }

                    completions.push(completion);
                }
            }
        }

        completions.sort();
        completions
    }
}
