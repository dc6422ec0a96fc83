// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Chat-completion and transcription client for Prompt Architect.
//!
//! Talks to any OpenAI-compatible endpoint (Groq by default). The
//! [`Provider`] trait is the seam the core library programs against;
//! [`mock`] holds in-process providers for tests.

pub mod lm;
pub mod mock;
pub mod provider;
pub mod request;
pub mod response;
pub mod transcription;

pub use lm::LMConfig;
pub use mock::{FailingProvider, MockProvider};
pub use provider::{HttpProvider, Provider, ProviderType, DEFAULT_BASE_URL};
pub use request::{LMRequest, Message, Role};
pub use response::{LMResponse, Usage};
pub use transcription::{AudioInput, Transcriber, DEFAULT_AUDIO_FILENAME};
