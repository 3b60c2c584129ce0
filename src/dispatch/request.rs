use std::sync::Arc;
use veritas_schema::GeminiGenerateContentRequest;

use crate::error::DispatchError;

/// A prompt plus whether search grounding is requested.
///
/// Also the memo key: both fields take part in equality, so the same prompt with
/// and without search are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request {
    prompt: Arc<str>,
    use_search: bool,
}

impl Request {
    pub fn new(prompt: impl Into<Arc<str>>, use_search: bool) -> Self {
        Self {
            prompt: prompt.into(),
            use_search,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn use_search(&self) -> bool {
        self.use_search
    }

    pub fn to_body(&self) -> GeminiGenerateContentRequest {
        let body = GeminiGenerateContentRequest::user_text(self.prompt.as_ref());
        if self.use_search {
            body.with_google_search()
        } else {
            body
        }
    }
}

/// Ordered, non-empty list of model identifiers. The first is preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidates(Vec<String>);

impl ModelCandidates {
    /// Trims names, drops blanks and duplicates (first occurrence wins).
    pub fn new<I, S>(names: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            let name = name.trim();
            if !name.is_empty() && !out.iter().any(|seen| seen == name) {
                out.push(name.to_string());
            }
        }
        if out.is_empty() {
            return Err(DispatchError::NoCandidates);
        }
        Ok(Self(out))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn preferred(&self) -> &str {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
