use veritas_schema::{GeminiResponseBody, WebSource};

use crate::error::DispatchError;

/// Answer returned by a successful dispatch.
///
/// `text` is kept exactly as the model produced it; callers render it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Candidate identifier that answered.
    pub model: String,
    /// Upstream `modelVersion`, when reported.
    pub model_version: Option<String>,
    pub text: String,
    /// Web pages the answer was grounded on (search requests only).
    pub sources: Vec<WebSource>,
}

impl Reply {
    pub(crate) fn from_response(
        model: &str,
        body: &GeminiResponseBody,
    ) -> Result<Self, DispatchError> {
        let Some(text) = body.text() else {
            return Err(DispatchError::EmptyReply {
                model: model.to_string(),
                finish_reason: body.finish_reason().map(str::to_string),
            });
        };

        Ok(Self {
            model: model.to_string(),
            model_version: body.model_version.clone(),
            text,
            sources: body.web_sources(),
        })
    }
}
