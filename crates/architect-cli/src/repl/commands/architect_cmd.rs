// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Pipeline and variable wizard commands.

use super::{on_off, parse_toggle, Command, ExecutionContext, Output};
use crate::repl::SessionState;
use architect::{extract_variables, fill_variables};
use console::style;
use std::cmp::Reverse;

/// Architect command - run the full pipeline.
pub struct ArchitectCommand;

impl Command for ArchitectCommand {
    fn name(&self) -> &str {
        "architect"
    }

    fn aliases(&self) -> &[&str] {
        &["run", "go"]
    }

    fn description(&self) -> &str {
        "Compile, draft and refine the master prompt"
    }

    fn help(&self) -> &str {
        "Usage: architect [task]\n\n\
         Compile the pending request, ask the architect model for a draft,\n\
         then run the critic and compression stages when enabled.\n\
         A task given here replaces the current one."
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        if !args.trim().is_empty() {
            state.task = args.trim().to_string();
        }

        let Some(request) = state.generation_request() else {
            return Output::error("No task set. Use 'task <text>' or 'transcribe <file>' first.");
        };

        let gateway = match ctx.gateway(state) {
            Ok(g) => g,
            Err(e) => return e.into(),
        };

        let mut config = ctx.config.clone();
        config.architect_model = state.architect_model.clone();
        let pipeline = config.pipeline(gateway);

        match ctx.block_on(pipeline.run(&request)) {
            Ok(result) => {
                state.apply_result(result);
                Output::text(render_result(state))
            }
            Err(e) => e.into(),
        }
    }
}

/// Format the last run for display.
pub(crate) fn render_result(state: &SessionState) -> String {
    let mut out = String::new();

    if let Some(note) = &state.critique_note {
        out.push_str(&format!("{} {}\n\n", style("Critic report:").yellow().bold(), note));
    }

    out.push_str(&format!("{}\n", style("FINAL MASTER PROMPT").cyan().bold()));
    out.push_str(state.master_prompt.as_deref().unwrap_or_default());

    if state.extract_vars {
        let names = state
            .master_prompt
            .as_deref()
            .map(extract_variables)
            .unwrap_or_default();
        if !names.is_empty() {
            out.push_str(&format!(
                "\n\n{} {}\n  Fill with: vars set <name> <value>",
                style("Variables:").cyan().bold(),
                names.join(", ")
            ));
        }
    }

    out
}

/// Vars command - list and fill `{{name}}` placeholders.
pub struct VarsCommand;

impl Command for VarsCommand {
    fn name(&self) -> &str {
        "vars"
    }

    fn aliases(&self) -> &[&str] {
        &["v"]
    }

    fn description(&self) -> &str {
        "List or fill placeholders in the master prompt"
    }

    fn help(&self) -> &str {
        "Usage: vars | vars set <name> <value> | vars fill | vars on|off\n\n\
         'vars' lists the placeholders and their values, 'vars fill' prints\n\
         the prompt with known values substituted, 'vars on|off' toggles\n\
         listing placeholders after each run.\n\n\
         Names may contain spaces: 'vars set customer name Ada' fills\n\
         {{customer name}}. The longest matching name wins."
    }

    fn arguments(&self) -> &[&str] {
        &["set", "fill", "on", "off"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let args = args.trim();
        let (sub, rest) = args.split_once(' ').unwrap_or((args, ""));

        if matches!(sub, "on" | "off") {
            let value = parse_toggle(sub, state.extract_vars).unwrap_or(state.extract_vars);
            state.extract_vars = value;
            return Output::success(format!("Variable wizard: {}", on_off(value)));
        }

        let Some(prompt) = state.master_prompt.as_deref() else {
            return Output::warning("No master prompt yet. Run 'architect' first.");
        };
        let names = extract_variables(prompt);

        match sub {
            "" => {
                if names.is_empty() {
                    return Output::text("No {{variables}} found.");
                }
                let mut out = String::new();
                for name in &names {
                    let value = state.variables.get(name).map(String::as_str);
                    out.push_str(&format!(
                        "  {} = {}\n",
                        style(name).green(),
                        value.unwrap_or("(unset)")
                    ));
                }
                Output::text(out.trim_end())
            }
            "set" => match split_assignment(rest.trim(), &names) {
                Some((name, value)) => {
                    state.variables.insert(name.to_string(), value.to_string());
                    Output::success(format!("{} set", name.trim()))
                }
                None => match rest.split_whitespace().next() {
                    Some(word) if !names.iter().any(|n| n.trim().starts_with(word)) => {
                        Output::warning(format!("'{}' is not a placeholder in the prompt", word))
                    }
                    _ => Output::error("Usage: vars set <name> <value>"),
                },
            },
            "fill" => Output::text(fill_variables(prompt, &state.variables)),
            other => Output::error(format!("Unknown subcommand: '{}'", other)),
        }
    }
}

/// Split `rest` into a placeholder name and its value.
///
/// Names are matched without surrounding whitespace, longest first, and
/// returned as they appear in the prompt. `None` when no name matches or
/// the value is missing.
fn split_assignment<'a>(rest: &'a str, names: &'a [String]) -> Option<(&'a str, &'a str)> {
    let mut candidates: Vec<&String> = names.iter().filter(|n| !n.trim().is_empty()).collect();
    candidates.sort_by_key(|n| (Reverse(n.trim().len()), n.len() != n.trim().len()));

    for name in candidates {
        let Some(value) = rest.strip_prefix(name.trim()) else {
            continue;
        };
        if value.is_empty() {
            // Whole input is a name with no value.
            return None;
        }
        if value.starts_with(char::is_whitespace) {
            return Some((name.as_str(), value.trim()));
        }
    }
    None
}
