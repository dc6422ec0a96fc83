// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Run one prompt against two models side by side.

use crate::error::Result;
use crate::gateway::Gateway;
use architect_client::{LMConfig, LMRequest};

/// Default first contender.
pub const DEFAULT_MODEL_A: &str = "llama-3.3-70b-versatile";
/// Default second contender.
pub const DEFAULT_MODEL_B: &str = "mixtral-8x7b-32768";

/// Outcome of one arena branch.
#[derive(Debug)]
pub struct ArenaOutcome {
    /// Model the branch ran against.
    pub model: String,
    /// Its reply, or the error it hit.
    pub result: Result<String>,
}

impl ArenaOutcome {
    /// True when the branch produced text.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Both branches of a duel.
#[derive(Debug)]
pub struct ArenaResult {
    /// First model's outcome.
    pub a: ArenaOutcome,
    /// Second model's outcome.
    pub b: ArenaOutcome,
}

/// Send `prompt` as a lone user message to both models concurrently.
///
/// Each branch resolves on its own; a failure in one never cancels or hides
/// the other.
pub async fn duel(gateway: &Gateway, prompt: &str, model_a: &str, model_b: &str) -> ArenaResult {
    tracing::debug!(model_a, model_b, "starting arena");
    let config_a = LMConfig::for_model(model_a);
    let config_b = LMConfig::for_model(model_b);

    let (a, b) = tokio::join!(
        gateway.complete(LMRequest::user_only(prompt), &config_a),
        gateway.complete(LMRequest::user_only(prompt), &config_b),
    );

    ArenaResult {
        a: ArenaOutcome {
            model: config_a.model,
            result: a,
        },
        b: ArenaOutcome {
            model: config_b.model,
            result: b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_client::{FailingProvider, MockProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_both_succeed() {
        let mock = Arc::new(MockProvider::new(|call| format!("{} says hi", call.model)));
        let gateway = Gateway::with_provider(mock.clone());

        let result = duel(&gateway, "hello", DEFAULT_MODEL_A, DEFAULT_MODEL_B).await;
        assert_eq!(result.a.result.unwrap(), "llama-3.3-70b-versatile says hi");
        assert_eq!(result.b.result.unwrap(), "mixtral-8x7b-32768 says hi");

        for call in mock.calls() {
            assert_eq!(call.system, "");
            assert_eq!(call.user, "hello");
        }
    }

    #[tokio::test]
    async fn test_one_branch_fails() {
        let mock = Arc::new(MockProvider::echo().fail_on_model("a"));
        let gateway = Gateway::with_provider(mock);

        let result = duel(&gateway, "ping", "a", "b").await;
        assert!(!result.a.is_ok());
        assert!(result.a.result.unwrap_err().is_service_error());
        assert_eq!(result.b.result.unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_both_fail() {
        let gateway = Gateway::with_provider(Arc::new(FailingProvider::new("down")));
        let result = duel(&gateway, "ping", "a", "b").await;
        assert!(!result.a.is_ok());
        assert!(!result.b.is_ok());
        assert_eq!(result.b.model, "b");
    }
}
