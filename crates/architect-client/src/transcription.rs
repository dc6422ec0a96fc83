// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Speech-to-text over the provider's audio endpoint.

use crate::provider::{status_error, HttpProvider};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::borrow::Cow;

/// Filename sent with raw buffers; the endpoint infers the codec from it.
pub const DEFAULT_AUDIO_FILENAME: &str = "input.wav";

/// An audio buffer with the filename the endpoint should see.
#[derive(Debug, Clone)]
pub struct AudioInput<'a> {
    /// Encoded audio
    pub bytes: Cow<'a, [u8]>,
    /// Filename reported in the multipart part
    pub filename: Cow<'a, str>,
}

impl<'a> AudioInput<'a> {
    /// Wrap a buffer under [`DEFAULT_AUDIO_FILENAME`].
    pub fn new(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: Cow::Borrowed(DEFAULT_AUDIO_FILENAME),
        }
    }

    /// Override the filename.
    pub fn with_filename(mut self, filename: impl Into<Cow<'a, str>>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Backends that can turn speech into plain text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio` with `model`, returning the plain-text transcript.
    async fn transcribe(&self, audio: AudioInput<'_>, model: &str) -> anyhow::Result<String>;
}

#[async_trait]
impl Transcriber for HttpProvider {
    async fn transcribe(&self, audio: AudioInput<'_>, model: &str) -> anyhow::Result<String> {
        let part = Part::bytes(audio.bytes.into_owned()).file_name(audio.filename.into_owned());
        let form = Form::new()
            .part("file", part)
            .text("model", model.to_string())
            .text("response_format", "text");

        let response = self
            .client
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("transcription request failed: {}", e))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        Ok(text.trim().to_string())
    }
}
