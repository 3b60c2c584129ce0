use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `tools[]` object.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Grounds the answer in live Google Search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch::default()),
            ..Default::default()
        }
    }
}

/// `googleSearch` tool body. Currently an empty object on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GoogleSearch {
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}
