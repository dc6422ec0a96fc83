// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! REPL (Read-Eval-Print-Loop) for interactive prompt engineering.
//!
//! This module provides an interactive environment for:
//! - Setting the task, context, domain, target and few-shot examples
//! - Running the architect pipeline and filling placeholders
//! - Arena duels, reverse engineering and voice transcription
//! - Saving to and browsing the vault

mod commands;
mod completer;
mod engine;
mod history;
mod prompt;
mod state;

pub use commands::CommandRegistry;
pub use engine::Repl;
pub use state::SessionState;
