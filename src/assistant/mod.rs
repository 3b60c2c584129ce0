//! The two user-facing actions built on top of the dispatcher.

mod messages;
mod prompts;
mod search_fallback;

pub use messages::{
    Action, DEFAULT_RETRY_SECS, render_error, render_reply, render_search_fallback,
};
pub use prompts::{fallacy_request, verification_request};
pub use search_fallback::SearchFallback;

use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::dispatch::{Dispatcher, GenerateContent, Reply, Request};
use crate::error::{ErrorKind, VeritasError};

pub struct Assistant<B> {
    dispatcher: Dispatcher<B>,
    search_fallback: bool,
}

impl<B: GenerateContent> Assistant<B> {
    pub fn new(dispatcher: Dispatcher<B>, search_fallback: bool) -> Self {
        Self {
            dispatcher,
            search_fallback,
        }
    }

    pub fn from_config(backend: B, cfg: &Config) -> Result<Self, VeritasError> {
        let dispatcher = Dispatcher::from_config(backend, cfg)?;
        Ok(Self::new(dispatcher, cfg.assistant.search_fallback))
    }

    pub async fn detect_fallacies(&self, text: &str) -> Result<Arc<Reply>, VeritasError> {
        self.run(text, fallacy_request).await
    }

    pub async fn verify_claim(&self, claim: &str) -> Result<Arc<Reply>, VeritasError> {
        self.run(claim, verification_request).await
    }

    async fn run(
        &self,
        input: &str,
        build: fn(&str) -> Request,
    ) -> Result<Arc<Reply>, VeritasError> {
        if input.trim().is_empty() {
            return Err(VeritasError::EmptyInput);
        }
        Ok(self.dispatcher.dispatch(&build(input)).await?)
    }

    /// Manual search suggestions for a failed verification.
    ///
    /// Only offered when a model call actually failed for a reason other than
    /// every candidate being unknown upstream.
    pub fn search_fallback_for(&self, claim: &str, err: &VeritasError) -> Option<SearchFallback> {
        if !self.search_fallback || claim.trim().is_empty() {
            return None;
        }
        match err {
            VeritasError::Dispatch(err) if err.kind() != ErrorKind::NotFound => {
                info!(kind = ?err.kind(), "[Assistant] Offering manual search fallback");
                Some(SearchFallback::for_claim(claim))
            }
            _ => None,
        }
    }

    pub fn clear_cache(&self) {
        self.dispatcher.clear_cache();
    }

    pub fn dispatcher(&self) -> &Dispatcher<B> {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{Scripted, ScriptedBackend};
    use crate::dispatch::{ModelCandidates, ReplyMemo};

    const A: &str = "gemini-1.5-flash";
    const B: &str = "gemini-2.0-flash";

    fn assistant(script: Vec<(&'static str, Scripted)>) -> Assistant<ScriptedBackend> {
        let candidates = ModelCandidates::new([A, B]).expect("candidates");
        let dispatcher = Dispatcher::new(ScriptedBackend::new(script), candidates)
            .with_memo(ReplyMemo::new(None));
        Assistant::new(dispatcher, true)
    }

    #[tokio::test]
    async fn fallacies_go_out_without_search() {
        let a = assistant(vec![(A, Scripted::Reply("FALLACY: Bandwagon"))]);

        let reply = a
            .detect_fallacies("Everyone is doing it, so it must be right.")
            .await
            .expect("reply");
        assert_eq!(reply.text, "FALLACY: Bandwagon");
        assert_eq!(a.dispatcher().backend().search_flags(), vec![false]);
    }

    #[tokio::test]
    async fn verification_goes_out_with_search() {
        let a = assistant(vec![(A, Scripted::NotFound), (B, Scripted::Reply("False."))]);

        let reply = a.verify_claim("The moon is cheese.").await.expect("reply");
        assert_eq!(reply.model, B);
        assert_eq!(a.dispatcher().backend().search_flags(), vec![true, true]);
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_backend() {
        let a = assistant(vec![(A, Scripted::Reply("x"))]);

        assert!(matches!(
            a.detect_fallacies("  \n\t").await,
            Err(VeritasError::EmptyInput)
        ));
        assert!(matches!(a.verify_claim("").await, Err(VeritasError::EmptyInput)));
        assert_eq!(a.dispatcher().backend().call_count(), 0);
    }

    #[tokio::test]
    async fn same_text_in_both_modes_is_two_requests() {
        let a = assistant(vec![(A, Scripted::Reply("x"))]);

        a.verify_claim("claim").await.expect("verify");
        a.verify_claim("claim").await.expect("verify again");
        a.detect_fallacies("claim").await.expect("fallacies");
        assert_eq!(a.dispatcher().backend().call_count(), 2);

        a.clear_cache();
        a.verify_claim("claim").await.expect("verify after clear");
        assert_eq!(a.dispatcher().backend().call_count(), 3);
    }

    #[tokio::test]
    async fn rate_limited_verification_offers_search_fallback() {
        let a = assistant(vec![(A, Scripted::RateLimited)]);
        let claim = "The Great Wall is visible from space";

        let err = a.verify_claim(claim).await.expect_err("rate limited");
        assert_eq!(err.kind(), ErrorKind::RateLimited);

        let fallback = a.search_fallback_for(claim, &err).expect("fallback");
        assert_eq!(fallback.queries.len(), 3);
        assert!(
            fallback
                .search_url
                .as_str()
                .ends_with("?q=The+Great+Wall+is+visible+from+space")
        );
        assert_eq!(
            render_error(Action::Verify, &err),
            "Quota exhausted. Try again in 42 seconds."
        );
    }

    #[tokio::test]
    async fn other_failures_offer_fallback_but_not_found_does_not() {
        let a = assistant(vec![(A, Scripted::ServerError)]);
        let err = a.verify_claim("c").await.expect_err("server error");
        assert!(a.search_fallback_for("c", &err).is_some());

        let a = assistant(vec![(A, Scripted::Blocked)]);
        let err = a.verify_claim("c").await.expect_err("blocked");
        assert!(a.search_fallback_for("c", &err).is_some());

        let a = assistant(vec![]);
        let err = a.verify_claim("c").await.expect_err("all not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(a.search_fallback_for("c", &err).is_none());

        assert!(a.search_fallback_for("c", &VeritasError::EmptyInput).is_none());
    }

    #[tokio::test]
    async fn fallback_can_be_disabled() {
        let candidates = ModelCandidates::new([A]).expect("candidates");
        let dispatcher = Dispatcher::new(
            ScriptedBackend::new(vec![(A, Scripted::RateLimited)]),
            candidates,
        );
        let a = Assistant::new(dispatcher, false);

        let err = a.verify_claim("c").await.expect_err("rate limited");
        assert!(a.search_fallback_for("c", &err).is_none());
    }
}
