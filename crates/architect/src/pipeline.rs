// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Draft → critique → compression pipeline.
//!
//! ```no_run
//! # async fn run() -> architect::Result<()> {
//! use architect::{Gateway, GenerationRequest, Pipeline};
//!
//! let gateway = Gateway::connect(Some("gsk_..."), "https://api.groq.com/openai/v1")?;
//! let pipeline = Pipeline::new(gateway);
//! let result = pipeline.run(&GenerationRequest::new("scrape prices").critic(true)).await?;
//! println!("{}", result.final_text);
//! # Ok(())
//! # }
//! ```

use crate::compiler::{compile, draft, GenerationRequest, DRAFT_TEMPERATURE};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::refine::{compress, critique, CRITIQUE_NOTE, DEFAULT_REFINER_MODEL};
use crate::strategy::StrategyTable;
use architect_client::LMConfig;

/// Model used for the draft by default.
pub const DEFAULT_ARCHITECT_MODEL: &str = "llama-3.3-70b-versatile";

/// Model settings for each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageModels {
    /// Draft call.
    pub architect: LMConfig,
    /// Critic and compression calls.
    pub refiner: LMConfig,
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            architect: LMConfig::for_model(DEFAULT_ARCHITECT_MODEL)
                .with_temperature(DRAFT_TEMPERATURE),
            refiner: LMConfig::for_model(DEFAULT_REFINER_MODEL),
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    /// Compiler output.
    pub draft: String,
    /// Set when the critic ran.
    pub critique_note: Option<String>,
    /// Text after every enabled stage.
    pub final_text: String,
}

/// Runs the compiler and the optional refinement stages in order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    gateway: Gateway,
    table: StrategyTable,
    models: StageModels,
}

impl Pipeline {
    /// Pipeline with the default strategy table and models.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            table: StrategyTable::default(),
            models: StageModels::default(),
        }
    }

    /// Replace the strategy table.
    pub fn with_table(mut self, table: StrategyTable) -> Self {
        self.table = table;
        self
    }

    /// Replace the stage models.
    pub fn with_models(mut self, models: StageModels) -> Self {
        self.models = models;
        self
    }

    /// The gateway shared by every stage.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// The strategy table in use.
    pub fn table(&self) -> &StrategyTable {
        &self.table
    }

    /// The stage models in use.
    pub fn models(&self) -> &StageModels {
        &self.models
    }

    /// Compile, draft, then apply the enabled stages.
    ///
    /// The critic runs before compression. Any failing call aborts the run
    /// and nothing is returned.
    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineResult> {
        let compiled = compile(&self.table, request);
        tracing::debug!(
            domain = %request.domain,
            target = %request.target,
            examples = request.examples.len(),
            "compiled system instruction"
        );

        let draft_text = draft(&self.gateway, &compiled, &self.models.architect).await?;
        let mut final_text = draft_text.clone();
        let mut critique_note = None;

        if request.run_critic {
            final_text = critique(&self.gateway, &final_text, &self.models.refiner).await?;
            critique_note = Some(CRITIQUE_NOTE.to_string());
        }

        if request.run_compression {
            final_text = compress(&self.gateway, &final_text, &self.models.refiner).await?;
        }

        Ok(PipelineResult {
            draft: draft_text,
            critique_note,
            final_text,
        })
    }
}
