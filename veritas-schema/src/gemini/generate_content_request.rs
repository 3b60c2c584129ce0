//! Typed Gemini v1beta `generateContent` request body.
//!
//! Only the fields veritas actually sends are modeled; everything else round-trips
//! through `extra` so responses captured from the wild can be replayed in tests.

mod content;
mod tool;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub use content::{Content, Part};
pub use tool::{GoogleSearch, Tool};

/// Gemini `generateContent` request body.
///
/// Reference: <https://ai.google.dev/gemini-api/docs/text-generation>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateContentRequest {
    /// Required conversation turns.
    pub contents: Vec<Content>,

    /// Tool declarations. Search grounding is attached here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GeminiGenerateContentRequest {
    /// Single user turn carrying one text part.
    pub fn user_text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            tools: None,
            extra: BTreeMap::new(),
        }
    }

    /// Attaches the `googleSearch` grounding tool (idempotent).
    pub fn with_google_search(mut self) -> Self {
        let tools = self.tools.get_or_insert_with(Vec::new);
        if !tools.iter().any(|tool| tool.google_search.is_some()) {
            tools.push(Tool::google_search());
        }
        self
    }

    pub fn uses_google_search(&self) -> bool {
        self.tools
            .as_deref()
            .is_some_and(|tools| tools.iter().any(|tool| tool.google_search.is_some()))
    }

    /// Total characters across all text parts, used for logging without leaking the text.
    pub fn text_chars(&self) -> usize {
        self.contents
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .map(|text| text.chars().count())
            .sum()
    }
}
