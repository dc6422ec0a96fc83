// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Few-shot examples: CSV loading and prompt formatting.
//!
//! Uploads are CSV documents with `Input` and `Output` columns. Each row
//! becomes one [`Example`]; a bad upload yields an error and no examples,
//! never a partial list.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

/// Column holding the user query.
pub const INPUT_COLUMN: &str = "Input";
/// Column holding the expected answer.
pub const OUTPUT_COLUMN: &str = "Output";

/// One input/output demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// What the user asks.
    pub input: String,
    /// What the assistant should answer.
    pub output: String,
}

impl Example {
    /// Create an example.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl<I: Into<String>, O: Into<String>> From<(I, O)> for Example {
    fn from((input, output): (I, O)) -> Self {
        Self::new(input, output)
    }
}

/// Render examples as `<example>` blocks, in order.
///
/// ```
/// use architect::fewshot::{format_examples, Example};
///
/// let block = format_examples(&[Example::new("2+2?", "4")]);
/// assert_eq!(block, "<example>\nUSER: 2+2?\nAI: 4\n</example>\n");
/// ```
pub fn format_examples(examples: &[Example]) -> String {
    let mut block = String::with_capacity(examples.len() * 64);
    for example in examples {
        let _ = write!(
            block,
            "<example>\nUSER: {}\nAI: {}\n</example>\n",
            example.input, example.output
        );
    }
    block
}

/// Parse a CSV upload into examples.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<Example>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                Error::input_format(format!(
                    "missing '{}' column; ensure columns are '{}' and '{}'",
                    name, INPUT_COLUMN, OUTPUT_COLUMN
                ))
            })
    };
    let input_idx = column(INPUT_COLUMN)?;
    let output_idx = column(OUTPUT_COLUMN)?;

    let mut examples = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |idx: usize| {
            record.get(idx).ok_or_else(|| {
                Error::input_format(format!("row {} is missing a column", row + 1))
            })
        };
        examples.push(Example::new(field(input_idx)?, field(output_idx)?));
    }

    tracing::debug!(count = examples.len(), "loaded few-shot examples");
    Ok(examples)
}

/// Parse a CSV file into examples.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<Vec<Example>> {
    let file = std::fs::File::open(path.as_ref())?;
    load_csv(file)
}
