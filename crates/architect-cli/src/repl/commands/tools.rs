// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Arena, reverse engineer, transcription and export commands.

use super::{text_arg, Command, ExecutionContext, Output};
use crate::repl::SessionState;
use architect::export::{self, ExportFormat};
use architect::{duel, reverse_engineer, ArenaOutcome};
use architect_client::{AudioInput, LMConfig};
use console::style;
use std::path::Path;

/// Arena command - run one prompt against two models.
pub struct ArenaCommand;

impl Command for ArenaCommand {
    fn name(&self) -> &str {
        "arena"
    }

    fn aliases(&self) -> &[&str] {
        &["fight"]
    }

    fn description(&self) -> &str {
        "Test a prompt against two models side by side"
    }

    fn help(&self) -> &str {
        "Usage: arena [prompt | @file] | arena models <model_a> <model_b>\n\n\
         Without a prompt, the current master prompt is used. Each model\n\
         answers independently; one failing does not affect the other."
    }

    fn arguments(&self) -> &[&str] {
        &["models"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let args = args.trim();

        if let Some(rest) = args.strip_prefix("models") {
            let models: Vec<&str> = rest.split_whitespace().collect();
            return match models.as_slice() {
                [] => Output::text(format!(
                    "Fighter A: {}\nFighter B: {}",
                    state.arena_models.0, state.arena_models.1
                )),
                [a, b] => {
                    state.arena_models = (a.to_string(), b.to_string());
                    Output::success(format!("Arena: {} vs {}", a, b))
                }
                _ => Output::error("Usage: arena models <model_a> <model_b>"),
            };
        }

        let prompt = if args.is_empty() {
            match &state.master_prompt {
                Some(p) => p.clone(),
                None => return Output::error("Nothing to test. Give a prompt or run 'architect' first."),
            }
        } else {
            match text_arg(args) {
                Ok(p) => p,
                Err(e) => return Output::error(e),
            }
        };

        let gateway = match ctx.gateway(state) {
            Ok(g) => g,
            Err(e) => return e.into(),
        };

        let (model_a, model_b) = &state.arena_models;
        let result = ctx.block_on(duel(&gateway, &prompt, model_a, model_b));

        Output::text(format!(
            "{}\n\n{}",
            render_outcome("A", &result.a),
            render_outcome("B", &result.b)
        ))
    }
}

fn render_outcome(slot: &str, outcome: &ArenaOutcome) -> String {
    let header = style(format!("Fighter {} ({})", slot, outcome.model)).bold();
    match &outcome.result {
        Ok(text) => format!("{} {}\n{}", header, style("✓").green(), text),
        Err(e) => format!("{} {}\n{}", header, style("✗").red(), e),
    }
}

/// Reverse command - infer the prompt behind an output.
pub struct ReverseCommand;

impl Command for ReverseCommand {
    fn name(&self) -> &str {
        "reverse"
    }

    fn aliases(&self) -> &[&str] {
        &["decompile"]
    }

    fn description(&self) -> &str {
        "Infer the prompt that likely produced a sample output"
    }

    fn help(&self) -> &str {
        "Usage: reverse <text> | reverse @<file>"
    }

    fn takes_path(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let sample = match text_arg(args) {
            Ok(s) if !s.is_empty() => s,
            Ok(_) => return Output::error("Usage: reverse <text> | reverse @<file>"),
            Err(e) => return Output::error(e),
        };

        let gateway = match ctx.gateway(state) {
            Ok(g) => g,
            Err(e) => return e.into(),
        };

        let config = LMConfig::for_model(&state.architect_model);
        match ctx.block_on(reverse_engineer(&gateway, &sample, &config)) {
            Ok(prompt) => Output::text(format!(
                "{}\n{}",
                style("Likely source prompt:").cyan().bold(),
                prompt
            )),
            Err(e) => e.into(),
        }
    }
}

/// Transcribe command - turn recorded audio into the task.
pub struct TranscribeCommand;

impl Command for TranscribeCommand {
    fn name(&self) -> &str {
        "transcribe"
    }

    fn aliases(&self) -> &[&str] {
        &["voice"]
    }

    fn description(&self) -> &str {
        "Transcribe an audio file; the transcript becomes the default task"
    }

    fn help(&self) -> &str {
        "Usage: transcribe <audio-file>\n\n\
         The transcript is used as the task of the next 'architect' run\n\
         when no task is set."
    }

    fn takes_path(&self) -> bool {
        true
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let path = args.trim();
        if path.is_empty() {
            return Output::error("Usage: transcribe <audio-file>");
        }

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => return Output::error(format!("Failed to read {}: {}", path, e)),
        };

        let gateway = match ctx.gateway(state) {
            Ok(g) => g,
            Err(e) => return e.into(),
        };

        let mut audio = AudioInput::new(bytes);
        if let Some(name) = Path::new(path).file_name().and_then(|n| n.to_str()) {
            audio = audio.with_filename(name.to_string());
        }

        let model = &ctx.config.transcription_model;
        match ctx.block_on(gateway.transcribe(audio, model)) {
            Ok(text) => {
                state.transcript = Some(text.clone());
                Output::text(format!("{} {}", style("Heard:").green().bold(), text))
            }
            Err(e) => e.into(),
        }
    }
}

/// Export command - write the master prompt as a runnable script.
pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &str {
        "export"
    }

    fn description(&self) -> &str {
        "Export the master prompt as a Python script or curl command"
    }

    fn help(&self) -> &str {
        "Usage: export [python|curl] [path]\n\n\
         Without a path, the snippet is printed. With a path, it is written\n\
         to that file.\n\n\
         Examples:\n\
           export\n\
           export python agent.py\n\
           export curl"
    }

    fn arguments(&self) -> &[&str] {
        &["python", "curl"]
    }

    fn execute(
        &self,
        args: &str,
        state: &mut SessionState,
        ctx: &mut ExecutionContext<'_>,
    ) -> Output {
        let Some(prompt) = &state.master_prompt else {
            return Output::error("No master prompt yet. Run 'architect' first.");
        };

        let mut parts = args.split_whitespace();
        let format = match parts.next().map(str::parse::<ExportFormat>) {
            None => ExportFormat::default(),
            Some(Ok(f)) => f,
            Some(Err(e)) => return e.into(),
        };

        let snippet = export::render(format, prompt, &state.architect_model, &ctx.config.base_url);

        match parts.next() {
            None => Output::text(snippet),
            Some(path) => match std::fs::write(path, &snippet) {
                Ok(()) => Output::success(format!("Exported {} snippet to: {}", format, path)),
                Err(e) => Output::error(format!("Failed to write file: {}", e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::testing::Harness;
    use architect::reverse::REVERSE_INSTRUCTION;
    use architect_client::MockProvider;

    #[test]
    fn test_arena_isolates_failures() {
        let mut h = Harness::new(
            MockProvider::new(|call| format!("{} answer", call.model)).fail_on_model("bad-model"),
        );
        h.run(&ArenaCommand, "models bad-model good-model");
        assert_eq!(h.state.arena_models.0, "bad-model");

        match h.run(&ArenaCommand, "explain tcp") {
            Output::Text(text) => {
                assert!(text.contains("good-model answer"));
                assert!(text.contains("bad-model is unavailable"));
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_arena_needs_prompt() {
        let mut h = Harness::new(MockProvider::echo());
        assert!(matches!(h.run(&ArenaCommand, ""), Output::Error(_)));
        assert_eq!(h.provider.call_count(), 0);
    }

    #[test]
    fn test_reverse() {
        let mut h = Harness::new(MockProvider::fixed("Act as a pirate."));
        match h.run(&ReverseCommand, "Arr!") {
            Output::Text(text) => assert!(text.contains("Act as a pirate.")),
            other => panic!("unexpected output: {:?}", other),
        }
        assert_eq!(h.provider.calls()[0].system, REVERSE_INSTRUCTION);
    }

    #[test]
    fn test_transcribe_sets_fallback_task() {
        let mut h = Harness::new(MockProvider::echo().with_transcript("write a limerick"));
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("memo.wav");
        std::fs::write(&audio, [0u8, 1, 2]).unwrap();

        let out = h.run(&TranscribeCommand, &audio.display().to_string());
        assert!(matches!(out, Output::Text(_)));
        assert_eq!(h.state.effective_task(), Some("write a limerick"));
    }

    #[test]
    fn test_transcribe_missing_file() {
        let mut h = Harness::new(MockProvider::echo());
        let out = h.run(&TranscribeCommand, "/no/such/audio.wav");
        assert!(matches!(out, Output::Error(_)));
    }

    #[test]
    fn test_export() {
        let mut h = Harness::new(MockProvider::echo());
        assert!(matches!(h.run(&ExportCommand, ""), Output::Error(_)));

        h.state.master_prompt = Some("Be brief.".into());
        match h.run(&ExportCommand, "") {
            Output::Text(text) => assert!(text.contains("from groq import Groq")),
            other => panic!("unexpected output: {:?}", other),
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.sh");
        let out = h.run(&ExportCommand, &format!("curl {}", path.display()));
        assert!(matches!(out, Output::Success(_)));
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("curl "));

        assert!(matches!(h.run(&ExportCommand, "ruby"), Output::Error(_)));
    }
}
