// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! What a provider hands back for one completion.

use serde::Deserialize;

/// Text produced by a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LMResponse {
    /// Generated text
    pub text: String,

    /// Token counts, when the provider reports them
    pub usage: Option<Usage>,
}

/// Tokens billed for one call, as reported in the `usage` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LMResponse {
    /// Attach the provider's token counts.
    pub fn with_usage(mut self, usage: Option<Usage>) -> Self {
        self.usage = usage;
        self
    }

    /// Generated text, consuming the response.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<String> for LMResponse {
    fn from(text: String) -> Self {
        Self { text, usage: None }
    }
}
