use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;
use veritas_schema::{GeminiGenerateContentRequest, GeminiResponseBody};

use super::api::{GOOG_API_KEY_HEADER, GeminiApi};
use super::classify::classify_upstream_error;
use super::key::ApiKey;
use crate::config::GeminiConfig;
use crate::dispatch::GenerateContent;
use crate::error::{DispatchError, VeritasError};
use crate::utils::logging::with_pretty_json_debug;

pub(crate) const VERITAS_USER_AGENT: &str = concat!("veritas/", env!("CARGO_PKG_VERSION"));

/// Gemini REST backend: one HTTP attempt per call, no automatic retries.
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: Url,
    key: ApiKey,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig, key: ApiKey) -> Result<Self, VeritasError> {
        let client = build_client(cfg.proxy.as_ref(), cfg.request_timeout_secs)?;
        Ok(Self::with_http_client(client, cfg.api_base.clone(), key))
    }

    pub fn with_http_client(client: reqwest::Client, api_base: Url, key: ApiKey) -> Self {
        Self {
            client,
            api_base,
            key,
        }
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

fn build_client(
    proxy: Option<&Url>,
    request_timeout_secs: Option<u64>,
) -> Result<reqwest::Client, VeritasError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(VERITAS_USER_AGENT)
        .connect_timeout(Duration::from_secs(10));

    if let Some(secs) = request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(VeritasError::HttpClient)?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(VeritasError::HttpClient)
}

#[async_trait]
impl GenerateContent for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        body: &GeminiGenerateContentRequest,
    ) -> Result<GeminiResponseBody, DispatchError> {
        let url = GeminiApi::generate_url(&self.api_base, model).ok_or_else(|| {
            DispatchError::Endpoint {
                model: model.to_string(),
            }
        })?;

        with_pretty_json_debug(body, |pretty_body| {
            debug!(req.model = %model, body = %pretty_body, "[Gemini] Request body");
        });

        let resp = self
            .client
            .post(url)
            .header(GOOG_API_KEY_HEADER, self.key.header_value().clone())
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(classify_upstream_error(model, resp).await);
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice::<GeminiResponseBody>(&bytes)?)
    }
}
