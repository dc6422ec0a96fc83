// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! `{{name}}` placeholders.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"))
}

/// Distinct placeholder names in first-seen order.
///
/// ```
/// use architect::variables::extract_variables;
///
/// assert_eq!(extract_variables("Hi {{a}}, {{b}}, {{a}} again"), vec!["a", "b"]);
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder().captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace placeholders that have a value; leave the rest as written.
pub fn fill_variables(text: &str, values: &HashMap<String, String>) -> String {
    placeholder()
        .replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_first_seen_order() {
        assert_eq!(
            extract_variables("{{tone}} {{topic}} {{tone}} {{audience}}"),
            vec!["tone", "topic", "audience"]
        );
    }

    #[test]
    fn test_no_placeholders() {
        assert!(extract_variables("plain text { not } {{ unclosed").is_empty());
    }

    #[test]
    fn test_non_greedy() {
        assert_eq!(extract_variables("{{a}}}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_fill_known_and_unknown() {
        let mut values = HashMap::new();
        values.insert("name".to_string(), "Ada".to_string());

        let filled = fill_variables("Dear {{name}}, re: {{subject}}. Bye {{name}}", &values);
        assert_eq!(filled, "Dear Ada, re: {{subject}}. Bye Ada");
    }
}
