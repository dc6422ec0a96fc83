// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # Prompt Architect
//!
//! Drafts, critiques, compresses, tests and stores prompts for
//! chat-completion APIs.
//!
//! ## Architecture
//!
//! - **Strategy table**: domain and target-structure enums map to
//!   instruction fragments ([`strategy`]).
//! - **Compiler**: persona preamble + fragments + few-shot block, then one
//!   draft call ([`compiler`]).
//! - **Refinement**: optional critic and compression passes, each replacing
//!   the current text ([`refine`], [`pipeline`]).
//! - **Tools**: placeholder extraction ([`variables`]), JSON vault
//!   ([`vault`]), two-model arena ([`arena`]), reverse engineering
//!   ([`reverse`]), script export ([`export`]).
//!
//! Every network call goes through [`Gateway`].
//!
//! ## Quick Start
//!
//! ```
//! use architect::{DomainMode, Gateway, GenerationRequest, Pipeline};
//! use architect_client::MockProvider;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gateway = Gateway::with_provider(Arc::new(MockProvider::fixed("<role>...</role>")));
//! let request = GenerationRequest::new("Write a python script to scrape prices")
//!     .with_domain(DomainMode::Coding)
//!     .critic(true);
//!
//! let result = Pipeline::new(gateway).run(&request).await.unwrap();
//! assert_eq!(result.final_text, "<role>...</role>");
//! # }
//! ```

#![warn(missing_docs)]

pub mod arena;
pub mod compiler;
pub mod config;
pub mod error;
pub mod export;
pub mod fewshot;
pub mod gate;
pub mod gateway;
pub mod pipeline;
pub mod refine;
pub mod reverse;
pub mod strategy;
pub mod variables;
pub mod vault;

pub use arena::{duel, ArenaOutcome, ArenaResult};
pub use compiler::{compile, CompiledPrompt, GenerationRequest};
pub use config::ArchitectConfig;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use fewshot::Example;
pub use gate::{AccessGate, CredentialCheck, StaticSecret};
pub use gateway::Gateway;
pub use pipeline::{Pipeline, PipelineResult, StageModels};
pub use reverse::reverse_engineer;
pub use strategy::{DomainMode, StrategyTable, TargetStructure};
pub use variables::{extract_variables, fill_variables};
pub use vault::{Vault, VaultEntry};
