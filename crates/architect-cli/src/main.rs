// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prompt Architect CLI tool

#![allow(clippy::format_in_format_args)]

mod repl;

use anyhow::Context;
use architect::export::{self, ExportFormat};
use architect::fewshot;
use architect::{
    duel, extract_variables, reverse_engineer, ArchitectConfig, DomainMode, Example,
    GenerationRequest, TargetStructure, VaultEntry,
};
use architect_client::AudioInput;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "architect")]
#[command(about = "Turn rough task descriptions into structured master prompts", long_about = None)]
struct Cli {
    /// Path to architect.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Provider API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Architect model
    #[arg(long, global = true)]
    model: Option<String>,

    /// Chat-completion base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Vault file
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Password presented to the access gate
    #[arg(long, global = true, env = "ARCHITECT_LOGIN", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL (default)
    Repl,

    /// Build a master prompt from a task
    Architect {
        /// Task text, or @file
        task: String,

        /// Supporting context, or @file
        #[arg(short, long, default_value = "")]
        context: String,

        /// Domain mode (general, coding, creative, data, legal)
        #[arg(short, long, default_value = "general")]
        domain: DomainMode,

        /// Target structure (xml, markdown, search)
        #[arg(short, long, default_value = "xml")]
        target: TargetStructure,

        /// CSV of few-shot examples with Input and Output columns
        #[arg(short, long)]
        examples: Option<PathBuf>,

        /// Skip the critic stage
        #[arg(long)]
        no_critic: bool,

        /// Run the compression stage
        #[arg(long)]
        compress: bool,

        /// Save the result to the vault
        #[arg(long)]
        save: bool,
    },

    /// Run one prompt against two models
    Arena {
        /// Prompt text, or @file
        prompt: String,

        /// First model
        #[arg(long)]
        model_a: Option<String>,

        /// Second model
        #[arg(long)]
        model_b: Option<String>,
    },

    /// Infer the prompt that produced a piece of text
    Reverse {
        /// Sample text, or @file
        sample: String,
    },

    /// List saved prompts, newest first
    Vault {
        /// Show one entry in full
        #[arg(short, long)]
        show: Option<usize>,
    },

    /// Transcribe an audio file
    Transcribe {
        /// Audio file
        file: PathBuf,
    },

    /// Export a prompt as a runnable script
    Export {
        /// Prompt text, or @file
        prompt: String,

        /// Output format (python, curl)
        #[arg(short, long, default_value = "python")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List {{placeholders}} in a prompt
    Vars {
        /// Prompt text, or @file
        prompt: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let runtime = Runtime::new().context("failed to start async runtime")?;

    let command = cli.command.unwrap_or(Commands::Repl);
    if !matches!(command, Commands::Repl) {
        let mut gate = config.access_gate();
        if gate.is_guarded() {
            gate.attempt(cli.password.as_deref().unwrap_or(""))
                .context("set --password or ARCHITECT_LOGIN")?;
        }
    }

    match command {
        Commands::Repl => {
            let mut repl = repl::Repl::new(config, runtime.handle().clone())?;
            repl.run()?;
        }
        Commands::Architect {
            task,
            context,
            domain,
            target,
            examples,
            no_critic,
            compress,
            save,
        } => {
            let examples = examples.as_deref().map(load_examples).unwrap_or_default();
            let request = GenerationRequest::new(read_arg(&task)?)
                .with_context(read_arg(&context)?)
                .with_domain(domain)
                .with_target(target)
                .with_examples(examples)
                .critic(!no_critic)
                .compression(compress);

            let pipeline = config.pipeline(config.gateway()?);
            let result = runtime.block_on(pipeline.run(&request))?;

            if let Some(note) = &result.critique_note {
                eprintln!("{}", note);
            }
            println!("{}", result.final_text);

            let variables = extract_variables(&result.final_text);
            if !variables.is_empty() {
                eprintln!("Variables: {}", variables.join(", "));
            }

            if save {
                config
                    .vault()
                    .append(VaultEntry::for_domain(&result.final_text, domain))?;
                eprintln!("Saved to {}", config.vault_path.display());
            }
        }
        Commands::Arena {
            prompt,
            model_a,
            model_b,
        } => {
            let prompt = read_arg(&prompt)?;
            let model_a = model_a.unwrap_or_else(|| config.arena_model_a.clone());
            let model_b = model_b.unwrap_or_else(|| config.arena_model_b.clone());
            let gateway = config.gateway()?;

            let result = runtime.block_on(duel(&gateway, &prompt, &model_a, &model_b));
            for (label, outcome) in [("A", &result.a), ("B", &result.b)] {
                println!("=== Fighter {} ({}) ===", label, outcome.model);
                match &outcome.result {
                    Ok(text) => println!("{}\n", text),
                    Err(e) => println!("Error: {}\n", e),
                }
            }
        }
        Commands::Reverse { sample } => {
            let sample = read_arg(&sample)?;
            let gateway = config.gateway()?;
            let inferred = runtime.block_on(reverse_engineer(
                &gateway,
                &sample,
                &config.architect_config(),
            ))?;
            println!("{}", inferred);
        }
        Commands::Vault { show } => {
            let entries = config.vault().load_all();
            match show {
                Some(index) => {
                    let entry = entries
                        .get(index)
                        .with_context(|| format!("no vault entry {} ({} saved)", index, entries.len()))?;
                    println!("[{}] {} score={}", entry.timestamp, entry.tags, entry.score);
                    println!("{}", entry.prompt);
                }
                None if entries.is_empty() => println!("Vault is empty."),
                None => {
                    for (i, entry) in entries.iter().enumerate() {
                        let preview: String = entry.prompt.chars().take(60).collect();
                        println!(
                            "{:>3}  {}  {:<10} {:<4} {}",
                            i,
                            entry.timestamp,
                            entry.tags,
                            entry.score,
                            preview.replace('\n', " ")
                        );
                    }
                }
            }
        }
        Commands::Transcribe { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let mut audio = AudioInput::new(bytes);
            if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
                audio = audio.with_filename(name.to_string());
            }
            let gateway = config.gateway()?;
            let transcript =
                runtime.block_on(gateway.transcribe(audio, &config.transcription_model))?;
            println!("{}", transcript);
        }
        Commands::Export {
            prompt,
            format,
            output,
        } => {
            let prompt = read_arg(&prompt)?;
            let rendered = export::render(
                format,
                &prompt,
                &config.architect_model,
                &config.base_url,
            );
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Vars { prompt } => {
            for name in extract_variables(&read_arg(&prompt)?) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file and environment, then apply command-line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ArchitectConfig> {
    let mut config = ArchitectConfig::load(cli.config.as_deref())?;
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(model) = &cli.model {
        config.architect_model = model.clone();
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(vault) = &cli.vault {
        config.vault_path = vault.clone();
    }
    Ok(config)
}

/// Few-shot examples from `path`. A bad file is reported and yields none,
/// so the compiler falls back to inventing an example.
fn load_examples(path: &Path) -> Vec<Example> {
    match fewshot::load_csv_path(path) {
        Ok(examples) => examples,
        Err(e) => {
            eprintln!(
                "Warning: {}: {}. Continuing without examples.",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Literal text, or the contents of a file when prefixed with `@`.
fn read_arg(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("cannot read {}", path)),
        None => Ok(arg.to_string()),
    }
}
