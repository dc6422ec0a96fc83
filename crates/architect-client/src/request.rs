// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Chat-completion request types

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instruction context
    System,
    /// End-user turn
    User,
}

/// Message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message<'a> {
    /// Who is speaking
    pub role: Role,

    /// Content
    #[serde(borrow)]
    pub content: Cow<'a, str>,
}

impl<'a> Message<'a> {
    /// Create a system message
    pub fn system(content: impl Into<Cow<'a, str>>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<Cow<'a, str>>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Ordered messages plus an optional temperature override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LMRequest<'a> {
    /// Messages in the conversation
    #[serde(borrow)]
    pub messages: Vec<Message<'a>>,

    /// Override temperature
    pub temperature: Option<f32>,
}

impl<'a> LMRequest<'a> {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// A system instruction followed by one user turn.
    pub fn instructed(
        system: impl Into<Cow<'a, str>>,
        user: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self::new()
            .add_message(Message::system(system))
            .add_message(Message::user(user))
    }

    /// A single user turn with no system context.
    pub fn user_only(user: impl Into<Cow<'a, str>>) -> Self {
        Self::new().add_message(Message::user(user))
    }

    /// Add a message
    pub fn add_message(mut self, message: Message<'a>) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Content of the first system message, or `""`.
    pub fn system_text(&self) -> &str {
        self.first_with(Role::System)
    }

    /// Content of the last user message, or `""`.
    pub fn user_text(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_ref())
            .unwrap_or("")
    }

    fn first_with(&self, role: Role) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_ref())
            .unwrap_or("")
    }
}
