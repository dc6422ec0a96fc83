// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Layered configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults
//! 2. a YAML file (an explicit path, else `architect.yaml` in the platform
//!    config directory when it exists)
//! 3. environment variables
//!
//! The CLI applies its flags on top.
//!
//! ```yaml
//! base_url: https://api.groq.com/openai/v1
//! architect_model: llama-3.3-70b-versatile
//! vault_path: ~/prompts/vault.json
//! password: ""            # disables the access gate
//! domains:
//!   legal: Cite the governing statute for every claim.
//! ```

use crate::arena::{DEFAULT_MODEL_A, DEFAULT_MODEL_B};
use crate::compiler::DRAFT_TEMPERATURE;
use crate::error::{Error, Result};
use crate::gate::AccessGate;
use crate::gateway::Gateway;
use crate::pipeline::{Pipeline, StageModels, DEFAULT_ARCHITECT_MODEL};
use crate::refine::DEFAULT_REFINER_MODEL;
use crate::strategy::{DomainMode, StrategyTable, TargetStructure};
use crate::vault::{Vault, DEFAULT_VAULT_FILE};
use architect_client::{LMConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file looked up in the platform config directory.
pub const CONFIG_FILE: &str = "architect.yaml";

/// Default speech-to-text model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3-turbo";

/// Resolved settings for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectConfig {
    /// Provider API key.
    pub api_key: Option<String>,
    /// OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model for the draft call.
    pub architect_model: String,
    /// Model for critic and compression.
    pub refiner_model: String,
    /// Draft temperature.
    pub temperature: f32,
    /// Arena defaults.
    pub arena_model_a: String,
    /// Arena defaults.
    pub arena_model_b: String,
    /// Speech-to-text model.
    pub transcription_model: String,
    /// Vault file.
    pub vault_path: PathBuf,
    /// Access secret. `None` uses the built-in secret, `""` disables the gate.
    pub password: Option<String>,
    /// Domain fragment overrides.
    pub domains: HashMap<DomainMode, String>,
    /// Structure fragment overrides.
    pub structures: HashMap<TargetStructure, String>,
}

impl Default for ArchitectConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            architect_model: DEFAULT_ARCHITECT_MODEL.to_string(),
            refiner_model: DEFAULT_REFINER_MODEL.to_string(),
            temperature: DRAFT_TEMPERATURE,
            arena_model_a: DEFAULT_MODEL_A.to_string(),
            arena_model_b: DEFAULT_MODEL_B.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            vault_path: PathBuf::from(DEFAULT_VAULT_FILE),
            password: None,
            domains: HashMap::new(),
            structures: HashMap::new(),
        }
    }
}

impl ArchitectConfig {
    /// `architect.yaml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "lituus", "architect")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolve defaults, file and environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse YAML text. Missing keys keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("ARCHITECT_API_KEY").or_else(|| get("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(url) = get("ARCHITECT_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = get("ARCHITECT_MODEL") {
            self.architect_model = model;
        }
        if let Some(path) = get("ARCHITECT_VAULT") {
            self.vault_path = PathBuf::from(path);
        }
        // Kept even when empty: "" disables the gate.
        if let Some(password) = lookup("ARCHITECT_PASSWORD") {
            self.password = Some(password);
        }
    }

    /// Default strategy table with the configured overrides applied.
    pub fn strategy_table(&self) -> StrategyTable {
        let mut table = StrategyTable::default();
        table.apply(&self.domains, &self.structures);
        table
    }

    /// Per-stage model settings.
    pub fn stage_models(&self) -> StageModels {
        StageModels {
            architect: LMConfig::for_model(&self.architect_model)
                .with_temperature(self.temperature),
            refiner: LMConfig::for_model(&self.refiner_model),
        }
    }

    /// Settings for one-off calls against the architect model.
    pub fn architect_config(&self) -> LMConfig {
        LMConfig::for_model(&self.architect_model)
    }

    /// Connect to the provider. Fails when no API key is set.
    pub fn gateway(&self) -> Result<Gateway> {
        Gateway::connect(self.api_key.as_deref(), &self.base_url)
    }

    /// Pipeline over `gateway` using these settings.
    pub fn pipeline(&self, gateway: Gateway) -> Pipeline {
        Pipeline::new(gateway)
            .with_table(self.strategy_table())
            .with_models(self.stage_models())
    }

    /// The configured vault.
    pub fn vault(&self) -> Vault {
        Vault::new(&self.vault_path)
    }

    /// A fresh, locked access gate.
    pub fn access_gate(&self) -> AccessGate {
        AccessGate::from_secret(self.password.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ArchitectConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.architect_model, "llama-3.3-70b-versatile");
        assert_eq!(config.refiner_model, "llama-3.1-8b-instant");
        assert_eq!(config.arena_model_b, "mixtral-8x7b-32768");
        assert!((config.temperature - 0.6).abs() < f32::EPSILON);
        assert!(config.gateway().unwrap_err().is_configuration_error());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
architect_model: llama-3.1-8b-instant
domains:
  legal: Cite statutes.
structures:
  gemini-xml: Use <answer> tags.
"#;
        let config = ArchitectConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.architect_model, "llama-3.1-8b-instant");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let table = config.strategy_table();
        assert_eq!(table.domain_fragment(DomainMode::Legal), "Cite statutes.");
        assert_eq!(
            table.structure_fragment(TargetStructure::GeminiXml),
            "Use <answer> tags."
        );
        assert!(table.domain_fragment(DomainMode::Coding).contains("error handling"));
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(ArchitectConfig::from_yaml("  \n").unwrap(), ArchitectConfig::default());
    }

    #[test]
    fn test_bad_yaml() {
        let err = ArchitectConfig::from_yaml("domains: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ArchitectConfig::default();
        config.apply_env(env(&[
            ("GROQ_API_KEY", "gsk_groq"),
            ("ARCHITECT_MODEL", "custom"),
            ("ARCHITECT_VAULT", "/tmp/v.json"),
            ("ARCHITECT_BASE_URL", "   "),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("gsk_groq"));
        assert_eq!(config.architect_model, "custom");
        assert_eq!(config.vault_path, PathBuf::from("/tmp/v.json"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_architect_key_wins_over_groq_key() {
        let mut config = ArchitectConfig::default();
        config.apply_env(env(&[("GROQ_API_KEY", "g"), ("ARCHITECT_API_KEY", "a")]));
        assert_eq!(config.api_key.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_password_disables_gate() {
        let mut config = ArchitectConfig::default();
        assert!(!config.access_gate().is_authenticated());

        config.apply_env(env(&[("ARCHITECT_PASSWORD", "")]));
        assert!(config.access_gate().is_authenticated());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = ArchitectConfig::load(Some(Path::new("/nonexistent/architect.yaml"))).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("architect.yaml");
        std::fs::write(&path, "temperature: 0.2\nrefiner_model: tiny\n").unwrap();

        let config = ArchitectConfig::from_file(&path).unwrap();
        assert_eq!(config.refiner_model, "tiny");
        assert_eq!(config.stage_models().refiner.model, "tiny");
        assert!((config.stage_models().architect.temperature - 0.2).abs() < f32::EPSILON);
    }
}
