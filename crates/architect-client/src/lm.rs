// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Per-call model settings

use serde::{Deserialize, Serialize};

/// Model settings applied to a single completion call.
///
/// Request-level overrides in [`crate::LMRequest`] win over these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LMConfig {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens
    pub max_tokens: u32,
}

impl LMConfig {
    /// Settings for `model` with default sampling.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for LMConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 1.0,
            max_tokens: 4096,
        }
    }
}
