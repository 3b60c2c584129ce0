use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

const RETRY_INFO_TYPE: &str = "type.googleapis.com/google.rpc.RetryInfo";

/// Gemini API error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiErrorBody {
    #[serde(rename = "error")]
    pub inner: GeminiErrorObject,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiErrorObject {
    /// Numeric error code, usually equal to the HTTP status (`404`, `429`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// Human-readable error message.
    ///
    /// Example (`404`):
    /// - `"models/gemini-1.0-pro is not found for API version v1beta, or is not supported for generateContent."`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Google canonical status name, e.g. `"NOT_FOUND"` or `"RESOURCE_EXHAUSTED"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Structured `google.rpc.*` details. Kept raw; only retry hints are extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Value>>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GeminiErrorBody {
    pub fn status(&self) -> Option<&str> {
        self.inner
            .status
            .as_deref()
            .filter(|status| !status.trim().is_empty())
    }

    pub fn message(&self) -> Option<&str> {
        self.inner
            .message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }

    /// How long the upstream asks us to wait before trying again.
    ///
    /// Prefers an explicit `metadata.quotaResetTimeStamp`, then a
    /// `google.rpc.RetryInfo.retryDelay` such as `"37s"` or `"1.5s"`.
    pub fn retry_after(&self) -> Option<Duration> {
        let details = self.inner.details.as_ref()?;

        details
            .iter()
            .filter_map(|detail| {
                detail
                    .get("metadata")
                    .and_then(|m| m.get("quotaResetTimeStamp"))
                    .and_then(Value::as_str)
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            })
            .filter_map(|reset_dt| {
                let diff_secs = (reset_dt.with_timezone(&Utc) - Utc::now()).num_seconds();
                (diff_secs > 0).then(|| Duration::from_secs((diff_secs as u64).saturating_add(1)))
            })
            .next()
            .or_else(|| {
                details
                    .iter()
                    .filter(|detail| {
                        detail.get("@type").and_then(Value::as_str) == Some(RETRY_INFO_TYPE)
                    })
                    .filter_map(|detail| detail.get("retryDelay").and_then(Value::as_str))
                    .find_map(parse_proto_duration)
            })
    }
}

/// Parses a protobuf JSON `Duration` string (`"12s"`, `"0.5s"`).
fn parse_proto_duration(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().strip_suffix('s')?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then(|| Duration::from_secs_f64(secs))
}
