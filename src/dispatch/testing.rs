use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use veritas_schema::{GeminiGenerateContentRequest, GeminiResponseBody};

use super::GenerateContent;
use crate::error::DispatchError;

/// Canned outcome for one model. Models missing from the script answer `NotFound`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scripted {
    Reply(&'static str),
    NotFound,
    RateLimited,
    ServerError,
    Blocked,
}

/// Backend double that records every call it receives.
pub(crate) struct ScriptedBackend {
    script: HashMap<&'static str, Scripted>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl ScriptedBackend {
    pub(crate) fn new(script: Vec<(&'static str, Scripted)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn models_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub(crate) fn search_flags(&self) -> Vec<bool> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(_, search)| *search)
            .collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl GenerateContent for ScriptedBackend {
    async fn generate_content(
        &self,
        model: &str,
        body: &GeminiGenerateContentRequest,
    ) -> Result<GeminiResponseBody, DispatchError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((model.to_string(), body.uses_google_search()));

        match self.script.get(model).copied().unwrap_or(Scripted::NotFound) {
            Scripted::Reply(text) => Ok(serde_json::from_value(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": text}]},
                    "finishReason": "STOP"
                }]
            }))?),
            Scripted::NotFound => Err(DispatchError::NotFound {
                model: model.to_string(),
                message: format!("models/{model} is not found for API version v1beta"),
            }),
            Scripted::RateLimited => Err(DispatchError::RateLimited {
                model: model.to_string(),
                message: "Resource has been exhausted (e.g. check quota).".to_string(),
                retry_after: Some(Duration::from_secs(42)),
            }),
            Scripted::ServerError => Err(DispatchError::Upstream {
                model: model.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error has occurred.".to_string(),
            }),
            Scripted::Blocked => Ok(serde_json::from_value(json!({
                "candidates": [{"finishReason": "SAFETY"}]
            }))?),
        }
    }
}
