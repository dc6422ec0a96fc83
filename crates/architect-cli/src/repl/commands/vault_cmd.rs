// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Vault commands.

use super::{Command, ExecutionContext, Output};
use crate::repl::SessionState;
use architect::VaultEntry;
use console::style;

const PREVIEW_CHARS: usize = 80;

/// Save command - store the master prompt in the vault.
pub struct SaveCommand;

impl Command for SaveCommand {
    fn name(&self) -> &str {
        "save"
    }

    fn description(&self) -> &str {
        "Save the master prompt to the vault"
    }

    fn help(&self) -> &str {
        "Usage: save [score]\n\n\
         Store the master prompt, tagged with the current domain. The\n\
         score defaults to N/A."
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let Some(prompt) = &state.master_prompt else {
            return Output::error("No master prompt yet. Run 'architect' first.");
        };

        let mut entry = VaultEntry::for_domain(prompt.clone(), state.domain);
        if !args.trim().is_empty() {
            entry = entry.with_score(args.trim());
        }

        match ctx.vault.append(entry) {
            Ok(entries) => Output::success(format!(
                "Saved! ({} prompts in {})",
                entries.len(),
                ctx.vault.path().display()
            )),
            Err(e) => e.into(),
        }
    }
}

/// Vault command - browse saved prompts.
pub struct VaultCommand;

impl Command for VaultCommand {
    fn name(&self) -> &str {
        "vault"
    }

    fn description(&self) -> &str {
        "List saved prompts, most recent first"
    }

    fn help(&self) -> &str {
        "Usage: vault [list] | vault show <index>"
    }

    fn arguments(&self) -> &[&str] {
        &["list", "show"]
    }

    fn execute(
        &self,
        args: &str,
        _state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let entries = ctx.vault.load_all();
        let args = args.trim();
        let (sub, rest) = args.split_once(' ').unwrap_or((args, ""));

        match sub {
            "" | "list" => {
                if entries.is_empty() {
                    return Output::text("Vault is empty.");
                }
                let mut out = String::new();
                for (i, entry) in entries.iter().enumerate() {
                    out.push_str(&format!(
                        "  [{}] {} {} {}\n      {}\n",
                        i,
                        style(&entry.timestamp).dim(),
                        style(&entry.tags).yellow(),
                        style(format!("score: {}", entry.score)).dim(),
                        preview(&entry.prompt)
                    ));
                }
                Output::text(out.trim_end())
            }
            "show" => match rest.trim().parse::<usize>() {
                Ok(i) => match entries.get(i) {
                    Some(entry) => Output::text(format!(
                        "{} {} {}\n{}",
                        style(&entry.timestamp).dim(),
                        style(&entry.tags).yellow(),
                        style(format!("score: {}", entry.score)).dim(),
                        entry.prompt
                    )),
                    None => Output::error(format!(
                        "No entry {}. The vault has {} entries.",
                        i,
                        entries.len()
                    )),
                },
                Err(_) => Output::error("Usage: vault show <index>"),
            },
            other => Output::error(format!("Unknown subcommand: '{}'", other)),
        }
    }
}

fn preview(prompt: &str) -> String {
    let line = prompt.lines().next().unwrap_or("");
    if line.chars().count() > PREVIEW_CHARS || prompt.lines().nth(1).is_some() {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
