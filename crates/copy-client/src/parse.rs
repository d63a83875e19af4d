//! Cleanup of the model's answer into a [`CopyBlock`].

use std::sync::LazyLock;

use design_block::{CopyBlock, MAX_BULLETS};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::CopyError;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```json\s*").unwrap());
static BARE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\s*").unwrap());

/// Chat completion response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessageContent,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageContent {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, or empty.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map_or("", str::trim)
    }
}

/// Remove markdown code fences around a JSON answer.
pub fn strip_code_fences(text: &str) -> String {
    let text = JSON_FENCE.replace_all(text.trim(), "");
    BARE_FENCE.replace_all(&text, "").trim().to_string()
}

/// Parse and clean a model answer.
///
/// Quotes around the title are removed, leading quotes, bullet glyphs and
/// dashes are stripped from bullets, empty bullets are dropped and at most
/// three are kept. A missing title or no bullets is [`CopyError::Incomplete`].
pub fn parse_copy(text: &str) -> Result<CopyBlock, CopyError> {
    let value: Value = serde_json::from_str(&strip_code_fences(text))?;

    let title = value
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string();

    let bullets: Vec<String> = value
        .get("bullets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(clean_bullet)
                .filter(|b| !b.is_empty())
                .take(MAX_BULLETS)
                .collect()
        })
        .unwrap_or_default();

    let copy = CopyBlock::new(title, bullets);
    if !copy.is_complete() {
        return Err(CopyError::Incomplete);
    }
    Ok(copy)
}

fn clean_bullet(raw: &str) -> String {
    raw.trim_start_matches(['"', '\'', '•', '-'])
        .trim()
        .to_string()
}
