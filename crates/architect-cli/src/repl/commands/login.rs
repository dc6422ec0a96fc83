// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Login command.

use super::{Command, ExecutionContext, Output};
use crate::repl::SessionState;

/// Login command - unlock the session with the access password.
pub struct LoginCommand;

impl Command for LoginCommand {
    fn name(&self) -> &str {
        "login"
    }

    fn description(&self) -> &str {
        "Unlock the session with the access password"
    }

    fn help(&self) -> &str {
        "Usage: login <password>\n\n\
         Required before any other command when an access password is\n\
         configured. Attempts are not limited. Whitespace around the\n\
         password is ignored, as for every command argument; the\n\
         password itself must match exactly."
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn secret_argument(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        if state.gate.is_authenticated() {
            return Output::text("Already logged in.");
        }

        match state.gate.attempt(args.trim()) {
            Ok(()) => Output::success("Access granted"),
            Err(e) => e.into(),
        }
    }
}
