// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! External model gateway.
//!
//! [`Gateway`] is the single door to the model provider. Every stage of the
//! pipeline, the arena and the reverse engineer go through
//! [`Gateway::complete`], which logs an `llm_call` span and folds provider
//! failures into [`Error::Service`].
//!
//! A gateway cannot be built without a credential, so a missing API key
//! surfaces as [`Error::Configuration`] before any request is attempted:
//!
//! ```
//! use architect::Gateway;
//!
//! let err = Gateway::connect(None, "https://api.groq.com/openai/v1").err().unwrap();
//! assert!(err.is_configuration_error());
//! ```

use crate::error::{Error, Result};
use architect_client::{
    AudioInput, HttpProvider, LMConfig, LMRequest, Provider, ProviderType, Transcriber,
};
use std::sync::Arc;
use tracing::Instrument;

/// Handle to the chat-completion and transcription backends.
#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn Provider>,
    transcriber: Option<Arc<dyn Transcriber>>,
}

impl Gateway {
    /// Connect to an OpenAI-compatible endpoint.
    ///
    /// Fails with [`Error::Configuration`] when `api_key` is absent or blank.
    pub fn connect(api_key: Option<&str>, base_url: &str) -> Result<Self> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::configuration("an API key is required"))?;

        let http = Arc::new(HttpProvider::new(key).with_base_url(base_url));
        Ok(Self {
            provider: http.clone(),
            transcriber: Some(http),
        })
    }

    /// Wrap an existing provider. Transcription is unavailable until
    /// [`Gateway::with_transcriber`] is called.
    pub fn with_provider(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            transcriber: None,
        }
    }

    /// Attach a speech-to-text backend.
    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Kind of backend behind this gateway.
    pub fn provider_type(&self) -> ProviderType {
        self.provider.provider_type()
    }

    /// Send one chat-completion request and return the generated text.
    pub async fn complete(&self, request: LMRequest<'_>, config: &LMConfig) -> Result<String> {
        let span = tracing::info_span!(
            "llm_call",
            provider = %self.provider.provider_type(),
            model = %config.model,
        );

        async {
            let response = self
                .provider
                .complete(request, config)
                .await
                .map_err(|e| Error::service(format!("{}: {:#}", config.model, e)))?;

            if let Some(usage) = response.usage {
                tracing::info!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "llm call complete"
                );
            } else {
                tracing::info!("llm call complete");
            }

            Ok::<_, Error>(response.into_text())
        }
        .instrument(span)
        .await
    }

    /// Transcribe an audio buffer to plain text.
    pub async fn transcribe(&self, audio: AudioInput<'_>, model: &str) -> Result<String> {
        let transcriber = self
            .transcriber
            .as_ref()
            .ok_or_else(|| Error::configuration("no transcription backend configured"))?;

        tracing::debug!(bytes = audio.bytes.len(), model, "transcribing audio");
        transcriber
            .transcribe(audio, model)
            .await
            .map_err(|e| Error::service(format!("{}: {:#}", model, e)))
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("provider", &self.provider.provider_type())
            .field("transcription", &self.transcriber.is_some())
            .finish()
    }
}
