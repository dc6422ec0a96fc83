// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Critic and compression stages.
//!
//! Both stages are a single completion call whose output replaces the
//! current text outright. There is no score threshold and no second pass.

use crate::error::Result;
use crate::gateway::Gateway;
use architect_client::{LMConfig, LMRequest};

/// Rubric given to the critic model.
pub const CRITIC_RUBRIC: &str = "Critique this prompt for clarity, specificity and robustness of its constraints. Rate 0-10. If < 9, improve it. Output ONLY the improved version.";

/// Note shown after the critic has run.
pub const CRITIQUE_NOTE: &str = "Critic improved clarity & constraints.";

/// Instruction given to the compression model.
pub const COMPRESSION_INSTRUCTION: &str =
    "Compress this prompt by 30% without losing meaning. Remove fluff.";

/// Default model for both stages.
pub const DEFAULT_REFINER_MODEL: &str = "llama-3.1-8b-instant";

/// Rewrite `draft` against the critic rubric.
pub async fn critique(gateway: &Gateway, draft: &str, config: &LMConfig) -> Result<String> {
    tracing::debug!(model = %config.model, "running critic stage");
    gateway
        .complete(LMRequest::instructed(CRITIC_RUBRIC, draft), config)
        .await
}

/// Shorten `text` by roughly a third.
pub async fn compress(gateway: &Gateway, text: &str, config: &LMConfig) -> Result<String> {
    tracing::debug!(model = %config.model, chars = text.len(), "running compression stage");
    gateway
        .complete(LMRequest::instructed(COMPRESSION_INSTRUCTION, text), config)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_client::MockProvider;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_critique_uses_rubric() {
        let mock = Arc::new(MockProvider::fixed("improved"));
        let gateway = Gateway::with_provider(mock.clone());

        let out = critique(&gateway, "draft", &LMConfig::for_model(DEFAULT_REFINER_MODEL))
            .await
            .unwrap();
        assert_eq!(out, "improved");

        let call = &mock.calls()[0];
        assert_eq!(call.system, CRITIC_RUBRIC);
        assert_eq!(call.user, "draft");
        assert_eq!(call.model, DEFAULT_REFINER_MODEL);
    }

    #[tokio::test]
    async fn test_compress_replaces_text() {
        let mock = Arc::new(MockProvider::new(|call| call.user[..4].to_string()));
        let gateway = Gateway::with_provider(mock.clone());

        let out = compress(&gateway, "long text", &LMConfig::for_model("m"))
            .await
            .unwrap();
        assert_eq!(out, "long");
        assert_eq!(mock.calls()[0].system, COMPRESSION_INSTRUCTION);
    }
}
