// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! REPL history that never records secrets.

use super::CommandRegistry;
use reedline::{
    History, HistoryItem, HistoryItemId, HistorySessionId, Result, SearchQuery,
};
use std::collections::HashSet;

/// Id handed back for lines that were not stored.
const REDACTED_ID: HistoryItemId = HistoryItemId::new(-1);

/// History wrapper that drops lines passing a secret to a command.
///
/// `login <password>` and `key <api-key>` are never saved; a bare
/// `login` or `key` is.
pub struct RedactedHistory<H> {
    inner: H,
    secret_commands: HashSet<String>,
}

impl<H: History> RedactedHistory<H> {
    /// Wrap `inner`, redacting every command in `registry` whose argument
    /// is secret, under its name and all aliases.
    pub fn new(inner: H, registry: &CommandRegistry) -> Self {
        let mut secret_commands = HashSet::new();
        for cmd in registry.commands().filter(|c| c.secret_argument()) {
            secret_commands.insert(cmd.name().to_string());
            secret_commands.extend(cmd.aliases().iter().map(|a| a.to_string()));
        }
        Self {
            inner,
            secret_commands,
        }
    }

    /// True when `line` would hand a secret to a command.
    pub fn is_secret(&self, line: &str) -> bool {
        match line.trim().split_once(char::is_whitespace) {
            Some((cmd, args)) => {
                self.secret_commands.contains(cmd) && !args.trim().is_empty()
            }
            None => false,
        }
    }
}

impl<H: History> History for RedactedHistory<H> {
    fn save(&mut self, h: HistoryItem) -> Result<HistoryItem> {
        if self.is_secret(&h.command_line) {
            return Ok(HistoryItem {
                id: Some(REDACTED_ID),
                command_line: String::new(),
                ..h
            });
        }
        self.inner.save(h)
    }

    fn load(&self, id: HistoryItemId) -> Result<HistoryItem> {
        self.inner.load(id)
    }

    fn count(&self, query: SearchQuery) -> Result<i64> {
        self.inner.count(query)
    }

    fn search(&self, query: SearchQuery) -> Result<Vec<HistoryItem>> {
        self.inner.search(query)
    }

    fn update(
        &mut self,
        id: HistoryItemId,
        updater: &dyn Fn(HistoryItem) -> HistoryItem,
    ) -> Result<()> {
        if id == REDACTED_ID {
            return Ok(());
        }
        self.inner.update(id, updater)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn delete(&mut self, h: HistoryItemId) -> Result<()> {
        self.inner.delete(h)
    }

    fn sync(&mut self) -> std::io::Result<()> {
        self.inner.sync()
    }

    fn session(&self) -> Option<HistorySessionId> {
        self.inner.session()
    }
}
