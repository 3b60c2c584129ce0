use reqwest::StatusCode;
use std::time::Duration;
use veritas_schema::GeminiErrorBody;

use crate::error::{DispatchError, ErrorKind};
use crate::utils::logging::with_pretty_json_debug;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// Maps an upstream error payload onto an [`ErrorKind`].
pub trait MappingKind {
    /// Structured rule; `None` defers to the status-only mapping.
    fn try_match_rule(&self) -> Option<ErrorKind>;

    fn kind_from_status(status: StatusCode) -> ErrorKind {
        match status {
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimited,
            _ => ErrorKind::Other,
        }
    }
}

impl MappingKind for GeminiErrorBody {
    fn try_match_rule(&self) -> Option<ErrorKind> {
        // Any canonical status string wins over the HTTP code.
        match self.status()? {
            "NOT_FOUND" => Some(ErrorKind::NotFound),
            "RESOURCE_EXHAUSTED" => Some(ErrorKind::RateLimited),
            _ => Some(ErrorKind::Other),
        }
    }
}

/// Turns a non-success response into a typed error attributed to `model`.
pub async fn classify_upstream_error(model: &str, resp: reqwest::Response) -> DispatchError {
    let status = resp.status();
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => return DispatchError::Transport(err),
    };
    classify_error_body(model, status, &bytes)
}

pub(crate) fn classify_error_body(model: &str, status: StatusCode, bytes: &[u8]) -> DispatchError {
    if let Ok(body) = serde_json::from_slice::<GeminiErrorBody>(bytes) {
        let kind = body
            .try_match_rule()
            .unwrap_or_else(|| GeminiErrorBody::kind_from_status(status));

        with_pretty_json_debug(&body, |pretty_error| {
            tracing::debug!(
                %status,
                ?kind,
                req.model = %model,
                body = %pretty_error,
                "Upstream structured error"
            );
        });

        let message = body
            .message()
            .map_or_else(|| fallback_message(status), str::to_string);
        return build_error(model, status, kind, message, body.retry_after());
    }

    let kind = GeminiErrorBody::kind_from_status(status);
    let raw_body = String::from_utf8_lossy(bytes);

    tracing::debug!(
        %status,
        ?kind,
        req.model = %model,
        body = %format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS),
        "Upstream unstructured error"
    );

    build_error(model, status, kind, fallback_message(status), None)
}

fn build_error(
    model: &str,
    status: StatusCode,
    kind: ErrorKind,
    message: String,
    retry_after: Option<Duration>,
) -> DispatchError {
    let model = model.to_string();
    match kind {
        ErrorKind::NotFound => DispatchError::NotFound { model, message },
        ErrorKind::RateLimited => DispatchError::RateLimited {
            model,
            message,
            retry_after,
        },
        ErrorKind::Other => DispatchError::Upstream {
            model,
            status,
            message,
        },
    }
}

fn fallback_message(status: StatusCode) -> String {
    format!("Upstream returned {status}")
}
