// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Domain and structure strategies.
//!
//! A [`StrategyTable`] maps each [`DomainMode`] and [`TargetStructure`] to
//! an instruction fragment. Selection is a table lookup, so adding a domain
//! or a target means adding a row, not touching the compiler. A variant
//! with no row selects the empty fragment.
//!
//! # Example
//!
//! ```
//! use architect::strategy::{DomainMode, StrategyTable, TargetStructure};
//!
//! let table = StrategyTable::default();
//! let strategy = table.select(DomainMode::Coding, TargetStructure::GeminiXml);
//! assert!(strategy.domain.contains("error handling"));
//! assert!(strategy.structure.contains("<role>"));
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Subject area the prompt is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainMode {
    /// No domain-specific rules.
    #[default]
    General,
    /// Software engineering tasks.
    Coding,
    /// Fiction, copy and other creative writing.
    Creative,
    /// Working with datasets and statistics.
    DataAnalysis,
    /// Contracts, policy and other legal text.
    Legal,
}

impl DomainMode {
    /// Every domain, in menu order.
    pub const ALL: [DomainMode; 5] = [
        Self::General,
        Self::Coding,
        Self::Creative,
        Self::DataAnalysis,
        Self::Legal,
    ];

    /// Human-readable label, also used as the vault tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Coding => "Coding",
            Self::Creative => "Creative Writing",
            Self::DataAnalysis => "Data Analysis",
            Self::Legal => "Legal",
        }
    }
}

impl fmt::Display for DomainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DomainMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        let mode = match key.as_str() {
            "general" => Self::General,
            "coding" | "code" => Self::Coding,
            "creative" | "creative writing" | "writing" => Self::Creative,
            "data" | "data analysis" | "analysis" => Self::DataAnalysis,
            "legal" | "law" => Self::Legal,
            _ => {
                return Err(Error::parse(format!(
                    "unknown domain '{}' (expected general, coding, creative, data, legal)",
                    s.trim()
                )))
            }
        };
        Ok(mode)
    }
}

/// Layout the compiled prompt should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetStructure {
    /// XML-tagged sections, suited to Gemini.
    #[default]
    GeminiXml,
    /// Markdown headers, suited to GPT-style models.
    MarkdownHeaders,
    /// Research outline that starts from search queries.
    SearchFirst,
}

impl TargetStructure {
    /// Every target, in menu order.
    pub const ALL: [TargetStructure; 3] =
        [Self::GeminiXml, Self::MarkdownHeaders, Self::SearchFirst];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeminiXml => "Gemini (XML)",
            Self::MarkdownHeaders => "GPT (Markdown)",
            Self::SearchFirst => "Search-First",
        }
    }
}

impl fmt::Display for TargetStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetStructure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        let target = match key.as_str() {
            "xml" | "gemini" | "gemini xml" | "gemini (xml)" => Self::GeminiXml,
            "markdown" | "md" | "gpt" | "gpt markdown" | "gpt (markdown)" | "markdown headers" => {
                Self::MarkdownHeaders
            }
            "search" | "search first" => Self::SearchFirst,
            _ => {
                return Err(Error::parse(format!(
                    "unknown target '{}' (expected xml, markdown, search)",
                    s.trim()
                )))
            }
        };
        Ok(target)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', '-'], " ")
}

/// The pair of fragments chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy<'a> {
    /// Domain rules, possibly empty.
    pub domain: &'a str,
    /// Structural rules, possibly empty.
    pub structure: &'a str,
}

/// Lookup table from strategy enums to instruction fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    domains: HashMap<DomainMode, String>,
    structures: HashMap<TargetStructure, String>,
}

impl StrategyTable {
    /// A table with no rows; every lookup yields `""`.
    pub fn empty() -> Self {
        Self {
            domains: HashMap::new(),
            structures: HashMap::new(),
        }
    }

    /// Set or replace the fragment for a domain.
    pub fn with_domain(mut self, mode: DomainMode, fragment: impl Into<String>) -> Self {
        self.domains.insert(mode, fragment.into());
        self
    }

    /// Set or replace the fragment for a target structure.
    pub fn with_structure(mut self, target: TargetStructure, fragment: impl Into<String>) -> Self {
        self.structures.insert(target, fragment.into());
        self
    }

    /// Overlay rows from another source, replacing existing ones.
    pub fn apply(
        &mut self,
        domains: &HashMap<DomainMode, String>,
        structures: &HashMap<TargetStructure, String>,
    ) {
        for (mode, text) in domains {
            self.domains.insert(*mode, text.clone());
        }
        for (target, text) in structures {
            self.structures.insert(*target, text.clone());
        }
    }

    /// Fragment for `mode`, or `""` when the table has no row for it.
    pub fn domain_fragment(&self, mode: DomainMode) -> &str {
        self.domains.get(&mode).map(String::as_str).unwrap_or("")
    }

    /// Fragment for `target`, or `""` when the table has no row for it.
    pub fn structure_fragment(&self, target: TargetStructure) -> &str {
        self.structures.get(&target).map(String::as_str).unwrap_or("")
    }

    /// Pick exactly one domain fragment and one structure fragment.
    pub fn select(&self, mode: DomainMode, target: TargetStructure) -> Strategy<'_> {
        Strategy {
            domain: self.domain_fragment(mode),
            structure: self.structure_fragment(target),
        }
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::empty()
            .with_domain(
                DomainMode::General,
                "Favor clarity and completeness; state any assumptions explicitly.",
            )
            .with_domain(
                DomainMode::Coding,
                "Include error handling, comments, and efficiency checks.",
            )
            .with_domain(
                DomainMode::Creative,
                "Use 'Show Don't Tell', avoid AI clichés, ensure unique voice.",
            )
            .with_domain(
                DomainMode::DataAnalysis,
                "State assumptions about the data shape, require units, name the method, and flag statistical caveats.",
            )
            .with_domain(
                DomainMode::Legal,
                "Name the jurisdiction, define key terms precisely, and note that the output is not legal advice.",
            )
            .with_structure(
                TargetStructure::GeminiXml,
                "Use XML tags (<role>, <task>, <constraints>).",
            )
            .with_structure(
                TargetStructure::MarkdownHeaders,
                "Use Markdown headers (# Identity, # Steps).",
            )
            .with_structure(
                TargetStructure::SearchFirst,
                "Open with the search queries to run, then use the sections # Sources, # Synthesis, # Answer.",
            )
    }
}
