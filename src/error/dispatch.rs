use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error as ThisError;

use super::{ErrorKind, IsRetryable};

#[derive(Debug, ThisError)]
pub enum DispatchError {
    /// Upstream does not know this model identifier.
    #[error("Model `{model}` not found: {message}")]
    NotFound { model: String, message: String },

    /// Quota or throughput exhausted for this key.
    #[error("Rate limited on `{model}`: {message}")]
    RateLimited {
        model: String,
        message: String,
        retry_after: Option<Duration>,
    },

    /// Any other non-success upstream status.
    #[error("Upstream error on `{model}` with status {status}: {message}")]
    Upstream {
        model: String,
        status: StatusCode,
        message: String,
    },

    /// Transport-level failure (DNS, connect, timeouts, body read).
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Successful call that carried no answer text, typically a safety block.
    #[error("Model `{model}` returned no text (finish reason: {})", .finish_reason.as_deref().unwrap_or("unknown"))]
    EmptyReply {
        model: String,
        finish_reason: Option<String>,
    },

    #[error("Cannot build endpoint for model `{model}`")]
    Endpoint { model: String },

    #[error("No model candidates configured")]
    NoCandidates,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::NotFound { .. } => ErrorKind::NotFound,
            DispatchError::RateLimited { .. } => ErrorKind::RateLimited,
            _ => ErrorKind::Other,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            DispatchError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Model the failure is attributed to, when there is one.
    pub fn model(&self) -> Option<&str> {
        match self {
            DispatchError::NotFound { model, .. }
            | DispatchError::RateLimited { model, .. }
            | DispatchError::Upstream { model, .. }
            | DispatchError::EmptyReply { model, .. }
            | DispatchError::Endpoint { model } => Some(model),
            DispatchError::Transport(_) | DispatchError::Decode(_) | DispatchError::NoCandidates => {
                None
            }
        }
    }
}

impl IsRetryable for DispatchError {
    fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
