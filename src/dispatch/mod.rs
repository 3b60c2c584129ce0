//! Multi-model request dispatch.
//!
//! A [`Dispatcher`] is the explicit context for talking to the model API: it owns
//! the backend (and through it the API key and HTTP client), the ordered model
//! candidates and the optional reply memo. Dropping it tears everything down.

mod backend;
mod reply;
mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::GenerateContent;
pub use reply::Reply;
pub use request::{ModelCandidates, Request};

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use veritas_memo::MemoStore;

use crate::config::Config;
use crate::error::{DispatchError, IsRetryable};

pub type ReplyMemo = MemoStore<Request, Reply>;

pub struct Dispatcher<B> {
    backend: B,
    candidates: ModelCandidates,
    memo: Option<ReplyMemo>,
}

impl<B: GenerateContent> Dispatcher<B> {
    /// Dispatcher without memoization.
    pub fn new(backend: B, candidates: ModelCandidates) -> Self {
        Self {
            backend,
            candidates,
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo: ReplyMemo) -> Self {
        self.memo = Some(memo);
        self
    }

    pub fn from_config(backend: B, cfg: &Config) -> Result<Self, DispatchError> {
        let candidates = cfg.gemini.candidates()?;
        let dispatcher = Self::new(backend, candidates);
        Ok(if cfg.cache.enabled {
            dispatcher.with_memo(ReplyMemo::new(cfg.cache.max_capacity))
        } else {
            dispatcher
        })
    }

    /// Returns the memoized reply for this exact request, or walks the candidates.
    ///
    /// Only successful replies are memoized.
    pub async fn dispatch(&self, request: &Request) -> Result<Arc<Reply>, DispatchError> {
        if let Some(hit) = self.memo.as_ref().and_then(|memo| memo.get(request)) {
            debug!(
                req.model = %hit.model,
                req.search = request.use_search(),
                "[Dispatch] Memo hit"
            );
            return Ok(hit);
        }

        let reply = Arc::new(self.try_candidates(request).await?);
        if let Some(memo) = &self.memo {
            memo.put(request.clone(), reply.clone());
        }
        Ok(reply)
    }

    /// Fallback loop: first success wins, `NotFound` moves on, anything else aborts.
    async fn try_candidates(&self, request: &Request) -> Result<Reply, DispatchError> {
        let body = request.to_body();
        let mut last_not_found: Option<DispatchError> = None;

        for (attempt, model) in self.candidates.iter().enumerate() {
            let start = Instant::now();
            debug!(
                req.model = %model,
                req.search = request.use_search(),
                req.prompt_chars = body.text_chars(),
                attempt = attempt + 1,
                "[Dispatch] Trying model candidate"
            );

            let outcome = self
                .backend
                .generate_content(model, &body)
                .await
                .and_then(|resp| Reply::from_response(model, &resp));

            match outcome {
                Ok(reply) => {
                    info!(
                        req.model = %model,
                        req.search = request.use_search(),
                        attempt = attempt + 1,
                        "[Dispatch] [{:?}] Reply from {}",
                        start.elapsed(),
                        model
                    );
                    return Ok(reply);
                }
                Err(err) if err.is_retryable() => {
                    warn!(
                        req.model = %model,
                        error = %err,
                        "[Dispatch] Model not found, trying next candidate"
                    );
                    last_not_found = Some(err);
                }
                Err(err) => {
                    warn!(
                        req.model = %model,
                        kind = ?err.kind(),
                        error = %err,
                        "[Dispatch] Request failed, not trying further candidates"
                    );
                    return Err(err);
                }
            }
        }

        Err(last_not_found.unwrap_or(DispatchError::NoCandidates))
    }

    /// Drops every memoized reply. Calls already in flight still complete normally.
    pub fn clear_cache(&self) {
        if let Some(memo) = &self.memo {
            memo.clear();
            info!("[Dispatch] Reply memo cleared");
        }
    }

    pub fn memo_enabled(&self) -> bool {
        self.memo.is_some()
    }

    pub fn cached_replies(&self) -> u64 {
        self.memo.as_ref().map_or(0, ReplyMemo::len)
    }

    pub fn candidates(&self) -> &ModelCandidates {
        &self.candidates
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
