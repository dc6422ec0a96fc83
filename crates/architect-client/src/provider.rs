// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Provider abstraction for chat-completion backends

use crate::lm::LMConfig;
use crate::request::{LMRequest, Message};
use crate::response::{LMResponse, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Type of LM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Groq (OpenAI-compatible)
    Groq,
    /// OpenAI or any other compatible endpoint
    OpenAI,
    /// Local server (Ollama, vLLM, ...)
    Local,
    /// In-process test double
    Mock,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
            Self::Local => "local",
            Self::Mock => "mock",
        };
        f.write_str(name)
    }
}

/// Provider trait for LM backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Complete a request
    async fn complete(
        &self,
        request: LMRequest<'_>,
        config: &LMConfig,
    ) -> anyhow::Result<LMResponse>;

    /// Get provider type
    fn provider_type(&self) -> ProviderType;
}

/// HTTP provider for OpenAI-compatible chat-completion APIs
pub struct HttpProvider {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
    kind: ProviderType,
}

impl HttpProvider {
    /// Create a provider against the default (Groq) endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            kind: ProviderType::Groq,
        }
    }

    /// Point at another compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.kind = classify(&base_url);
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Endpoint root, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn classify(base_url: &str) -> ProviderType {
    if base_url.contains("groq.com") {
        ProviderType::Groq
    } else if base_url.contains("localhost") || base_url.contains("127.0.0.1") {
        ProviderType::Local
    } else {
        ProviderType::OpenAI
    }
}

/// Turn a non-success HTTP status into a readable error.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    match status.as_u16() {
        401 => anyhow::anyhow!("authentication failed (401): check your API key"),
        403 => anyhow::anyhow!("access forbidden (403): {}", body),
        429 => anyhow::anyhow!("rate limit exceeded (429): {}", body),
        _ => anyhow::anyhow!("provider returned {}: {}", status, body),
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn complete(
        &self,
        request: LMRequest<'_>,
        config: &LMConfig,
    ) -> anyhow::Result<LMResponse> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: &'a [Message<'a>],
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
            usage: Option<Usage>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
        }

        let body = ChatRequest {
            model: &config.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(config.temperature),
            max_tokens: config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request to {} failed: {}", self.base_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No choices in response"))?;

        let text = choice.message.content.unwrap_or_default();
        Ok(LMResponse::from(text).with_usage(parsed.usage))
    }

    fn provider_type(&self) -> ProviderType {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_groq() {
        let provider = HttpProvider::new("gsk_test");
        assert_eq!(provider.provider_type(), ProviderType::Groq);
        assert_eq!(
            provider.endpoint("chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let provider = HttpProvider::new("key").with_base_url("http://localhost:11434/v1/");
        assert_eq!(provider.provider_type(), ProviderType::Local);
        assert_eq!(provider.base_url(), "http://localhost:11434/v1");

        let provider = HttpProvider::new("key").with_base_url("https://api.openai.com/v1");
        assert_eq!(provider.provider_type(), ProviderType::OpenAI);
    }

    #[test]
    fn test_status_error_messages() {
        let err = status_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert!(err.to_string().contains("API key"));

        let err = status_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_provider_type_display() {
        assert_eq!(ProviderType::Groq.to_string(), "groq");
        assert_eq!(ProviderType::Mock.to_string(), "mock");
    }
}
