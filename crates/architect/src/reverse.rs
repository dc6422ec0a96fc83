// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Infer the prompt behind a sample output.

use crate::error::Result;
use crate::gateway::Gateway;
use architect_client::{LMConfig, LMRequest};

/// Instruction given to the model.
pub const REVERSE_INSTRUCTION: &str = "Reverse-engineer the prompt that likely created this text. Identify constraints, tone, and persona.";

/// Ask the model for the likely source prompt of `sample`. The reply is
/// returned verbatim.
pub async fn reverse_engineer(gateway: &Gateway, sample: &str, config: &LMConfig) -> Result<String> {
    tracing::debug!(model = %config.model, chars = sample.len(), "reverse engineering sample");
    gateway
        .complete(LMRequest::instructed(REVERSE_INSTRUCTION, sample), config)
        .await
}
