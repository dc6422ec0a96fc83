// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! File-backed store of saved prompts.
//!
//! The vault is a JSON array, most recent entry first. Every save reads the
//! file, prepends the new entry and rewrites the whole array through a
//! sibling temp file. There is no locking; concurrent writers may lose
//! entries.

use crate::error::Result;
use crate::strategy::DomainMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default vault file name.
pub const DEFAULT_VAULT_FILE: &str = "prompt_vault.json";

/// Score recorded when none is given.
pub const UNSCORED: &str = "N/A";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One saved prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Local time of the save, `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
    /// The saved prompt text.
    pub prompt: String,
    /// Domain label.
    pub tags: String,
    /// Free-form score.
    pub score: String,
}

impl VaultEntry {
    /// Entry stamped with the current local time and no score.
    pub fn new(prompt: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            prompt: prompt.into(),
            tags: tags.into(),
            score: UNSCORED.to_string(),
        }
    }

    /// Entry tagged with a domain label.
    pub fn for_domain(prompt: impl Into<String>, domain: DomainMode) -> Self {
        Self::new(prompt, domain.label())
    }

    /// Set the score.
    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = score.into();
        self
    }
}

/// Handle to a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    path: PathBuf,
}

impl Vault {
    /// Vault stored at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, most recent first.
    ///
    /// A missing or unreadable file yields an empty list.
    pub fn load_all(&self) -> Vec<VaultEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read vault");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "vault is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Prepend `entry`, persist, and return the new sequence.
    pub fn append(&self, entry: VaultEntry) -> Result<Vec<VaultEntry>> {
        let mut entries = self.load_all();
        entries.insert(0, entry);
        self.write_all(&entries)?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "saved to vault");
        Ok(entries)
    }

    fn write_all(&self, entries: &[VaultEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries.serialize(&mut ser)?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&buf)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new(DEFAULT_VAULT_FILE)
    }
}
