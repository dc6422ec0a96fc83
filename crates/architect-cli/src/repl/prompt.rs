// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Dynamic prompt builder for the REPL.

use super::SessionState;
use architect::TargetStructure;
use console::style;

/// Builder for the REPL prompt.
pub struct PromptBuilder {
    /// Whether to use colors.
    use_colors: bool,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Create a new prompt builder.
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
        }
    }

    /// Disable colors.
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Build the prompt string.
    pub fn build(&self, state: &SessionState) -> String {
        let mut prompt = String::new();

        if self.use_colors {
            prompt.push_str(&format!("{}", style("architect").cyan().bold()));
        } else {
            prompt.push_str("architect");
        }

        if !state.gate.is_authenticated() {
            if self.use_colors {
                prompt.push_str(&format!(" {}", style("[locked]").red()));
            } else {
                prompt.push_str(" [locked]");
            }
        } else {
            let target = short_target(state.target);
            if self.use_colors {
                prompt.push_str(&format!(
                    " [{}|{}]",
                    style(state.domain.label()).yellow(),
                    style(target).yellow()
                ));
            } else {
                prompt.push_str(&format!(" [{}|{}]", state.domain.label(), target));
            }

            if !state.examples.is_empty() {
                let count = format!("{} examples", state.examples.len());
                if self.use_colors {
                    prompt.push_str(&format!(" ({})", style(count).dim()));
                } else {
                    prompt.push_str(&format!(" ({})", count));
                }
            }

            if state.master_prompt.is_some() {
                if self.use_colors {
                    prompt.push_str(&format!(" {}", style("◆").green()));
                } else {
                    prompt.push_str(" *");
                }
            }
        }

        prompt.push_str("> ");
        prompt
    }

    /// Build an error indicator.
    pub fn error_indicator(&self) -> String {
        if self.use_colors {
            format!("{}", style("✗").red().bold())
        } else {
            "ERROR".to_string()
        }
    }

    /// Build a success indicator.
    pub fn success_indicator(&self) -> String {
        if self.use_colors {
            format!("{}", style("✓").green().bold())
        } else {
            "OK".to_string()
        }
    }

    /// Build a warning indicator.
    pub fn warning_indicator(&self) -> String {
        if self.use_colors {
            format!("{}", style("⚠").yellow().bold())
        } else {
            "WARN".to_string()
        }
    }
}

fn short_target(target: TargetStructure) -> &'static str {
    match target {
        TargetStructure::GeminiXml => "xml",
        TargetStructure::MarkdownHeaders => "md",
        TargetStructure::SearchFirst => "search",
    }
}
