// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! In-process providers for tests and offline runs.
//!
//! [`MockProvider`] answers from a closure and records every call so tests
//! can assert on what was sent. [`FailingProvider`] always errors.

use crate::lm::LMConfig;
use crate::provider::{Provider, ProviderType};
use crate::request::LMRequest;
use crate::response::LMResponse;
use crate::transcription::{AudioInput, Transcriber};
use async_trait::async_trait;
use parking_lot::Mutex;

/// A call observed by [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Model the call targeted
    pub model: String,
    /// First system message, or empty
    pub system: String,
    /// Last user message
    pub user: String,
    /// Effective temperature
    pub temperature: f32,
}

type Responder = Box<dyn Fn(&RecordedCall) -> String + Send + Sync>;

/// Provider that generates responses with a closure.
pub struct MockProvider {
    responder: Responder,
    failing_models: Vec<String>,
    transcript: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    /// Create a mock that answers every call with `responder`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> String + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            failing_models: Vec::new(),
            transcript: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text.
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| text.clone())
    }

    /// Echo the user message back.
    pub fn echo() -> Self {
        Self::new(|call| call.user.clone())
    }

    /// Make calls against `model` fail.
    pub fn fail_on_model(mut self, model: impl Into<String>) -> Self {
        self.failing_models.push(model.into());
        self
    }

    /// Transcript returned by [`Transcriber::transcribe`].
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Every completion call seen so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of completion calls seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        request: LMRequest<'_>,
        config: &LMConfig,
    ) -> anyhow::Result<LMResponse> {
        let call = RecordedCall {
            model: config.model.clone(),
            system: request.system_text().to_string(),
            user: request.user_text().to_string(),
            temperature: request.temperature.unwrap_or(config.temperature),
        };
        self.calls.lock().push(call.clone());

        if self.failing_models.iter().any(|m| *m == call.model) {
            anyhow::bail!("model {} is unavailable", call.model);
        }

        Ok(LMResponse::from((self.responder)(&call)))
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Mock
    }
}

#[async_trait]
impl Transcriber for MockProvider {
    async fn transcribe(&self, _audio: AudioInput<'_>, _model: &str) -> anyhow::Result<String> {
        self.transcript
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no transcript configured"))
    }
}

/// Provider that fails every call with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    /// Create a new failing provider with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Provider for FailingProvider {
    async fn complete(
        &self,
        _request: LMRequest<'_>,
        _config: &LMConfig,
    ) -> anyhow::Result<LMResponse> {
        Err(anyhow::anyhow!("{}", self.message))
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Mock
    }
}

#[async_trait]
impl Transcriber for FailingProvider {
    async fn transcribe(&self, _audio: AudioInput<'_>, _model: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let provider = MockProvider::new(|call| format!("reply to {}", call.user));
        let config = LMConfig::for_model("m1");

        let resp = provider
            .complete(LMRequest::instructed("sys", "hi"), &config)
            .await
            .unwrap();

        assert_eq!(resp.text, "reply to hi");
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "sys");
        assert_eq!(calls[0].model, "m1");
    }

    #[tokio::test]
    async fn test_mock_fails_on_model() {
        let provider = MockProvider::echo().fail_on_model("broken");

        let err = provider
            .complete(LMRequest::user_only("x"), &LMConfig::for_model("broken"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("broken"));

        let ok = provider
            .complete(LMRequest::user_only("x"), &LMConfig::for_model("fine"))
            .await
            .unwrap();
        assert_eq!(ok.text, "x");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = FailingProvider::new("intentional failure");

        let result = provider
            .complete(LMRequest::user_only("x"), &LMConfig::default())
            .await;
        assert!(result.unwrap_err().to_string().contains("intentional failure"));

        let result = provider.transcribe(AudioInput::new(vec![0u8]), "w").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_transcript() {
        let provider = MockProvider::echo().with_transcript("write a haiku");
        let text = provider
            .transcribe(AudioInput::new(vec![0u8]), "whisper")
            .await
            .unwrap();
        assert_eq!(text, "write a haiku");
    }
}
