// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Render a finished prompt as a runnable snippet.

use crate::error::{Error, Result};
use architect_client::DEFAULT_BASE_URL;
use std::fmt;
use std::str::FromStr;

/// Snippet flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Python script using the provider SDK.
    #[default]
    Python,
    /// Shell `curl` command.
    Curl,
}

impl ExportFormat {
    /// Suggested file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Python => "agent.py",
            Self::Curl => "agent.sh",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => f.write_str("python"),
            Self::Curl => f.write_str("curl"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "curl" | "sh" | "shell" => Ok(Self::Curl),
            other => Err(Error::parse(format!(
                "unknown export format '{}' (expected python, curl)",
                other
            ))),
        }
    }
}

/// Render `prompt` as a snippet that sends it to `model`.
pub fn render(format: ExportFormat, prompt: &str, model: &str, base_url: &str) -> String {
    match format {
        ExportFormat::Python => python_script(prompt, model, base_url),
        ExportFormat::Curl => curl_command(prompt, model, base_url),
    }
}

/// Python script calling the chat-completion API.
///
/// The Groq SDK is used for the default endpoint, the OpenAI SDK with a
/// custom `base_url` for anything else.
pub fn python_script(prompt: &str, model: &str, base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let client = if base_url == DEFAULT_BASE_URL {
        "from groq import Groq\nclient = Groq(api_key=\"KEY\")\n".to_string()
    } else {
        format!(
            "from openai import OpenAI\nclient = OpenAI(api_key=\"KEY\", base_url=\"{}\")\n",
            python_escape(base_url)
        )
    };

    format!(
        "{client}prompt = \"\"\"{prompt}\"\"\"\nprint(client.chat.completions.create(model=\"{model}\", messages=[{{\"role\":\"user\", \"content\":prompt}}]).choices[0].message.content)\n",
        client = client,
        prompt = python_escape(prompt),
        model = python_escape(model),
    )
}

/// `curl` command posting to `{base_url}/chat/completions`.
pub fn curl_command(prompt: &str, model: &str, base_url: &str) -> String {
    let body = serde_json::json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
    });

    format!(
        "curl -s {url} \\\n  -H \"Authorization: Bearer $API_KEY\" \\\n  -H \"Content-Type: application/json\" \\\n  -d {body}\n",
        url = shell_quote(&format!("{}/chat/completions", base_url.trim_end_matches('/'))),
        body = shell_quote(&body.to_string()),
    )
}

fn python_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_default_endpoint() {
        let script = python_script("Be concise.", "llama-3.3-70b-versatile", DEFAULT_BASE_URL);
        assert!(script.starts_with("from groq import Groq\n"));
        assert!(script.contains("prompt = \"\"\"Be concise.\"\"\""));
        assert!(script.contains("model=\"llama-3.3-70b-versatile\""));
    }

    #[test]
    fn test_python_custom_endpoint() {
        let script = python_script("x", "m", "http://localhost:8080/v1/");
        assert!(script.contains("OpenAI(api_key=\"KEY\", base_url=\"http://localhost:8080/v1\")"));
    }

    #[test]
    fn test_python_escapes_quotes() {
        let script = python_script(r#"Say """hi""" \n"#, "m", DEFAULT_BASE_URL);
        assert!(script.contains(r#"prompt = """Say \"\"\"hi\"\"\" \\n""""#));
    }

    #[test]
    fn test_curl_escapes_single_quotes() {
        let cmd = curl_command("it's done", "m", DEFAULT_BASE_URL);
        assert!(cmd.starts_with("curl -s 'https://api.groq.com/openai/v1/chat/completions'"));
        assert!(cmd.contains(r#"it'\''s done"#));
        assert!(cmd.contains("$API_KEY"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("py".parse::<ExportFormat>().unwrap(), ExportFormat::Python);
        assert_eq!("CURL".parse::<ExportFormat>().unwrap(), ExportFormat::Curl);
        assert!("ruby".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Python.file_name(), "agent.py");
    }
}
