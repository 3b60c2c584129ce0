use std::fmt::Write as _;
use std::time::Duration;

use super::SearchFallback;
use crate::dispatch::Reply;
use crate::error::{ErrorKind, VeritasError};

/// Wait suggested when the upstream does not say how long to back off.
pub const DEFAULT_RETRY_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fallacies,
    Verify,
}

impl Action {
    pub fn heading(self) -> &'static str {
        match self {
            Action::Fallacies => "Analysis Breakdown",
            Action::Verify => "Verification Result",
        }
    }
}

pub fn render_reply(action: Action, reply: &Reply) -> String {
    let mut out = format!("### {}\n\n{}\n", action.heading(), reply.text.trim_end());

    if !reply.sources.is_empty() {
        out.push_str("\nSources:\n");
        for source in &reply.sources {
            match source.title.as_deref() {
                Some(title) => {
                    let _ = writeln!(out, "- {title} <{}>", source.uri);
                }
                None => {
                    let _ = writeln!(out, "- <{}>", source.uri);
                }
            }
        }
    }
    out
}

pub fn render_error(action: Action, err: &VeritasError) -> String {
    if err.kind() == ErrorKind::RateLimited {
        let secs = retry_secs(retry_after(err));
        return match action {
            Action::Fallacies => format!("Rate limit hit. Please wait {secs} seconds."),
            Action::Verify => format!("Quota exhausted. Try again in {secs} seconds."),
        };
    }

    match action {
        Action::Fallacies => format!("Error: {err}"),
        Action::Verify => format!("Search error: {err}"),
    }
}

pub fn render_search_fallback(fallback: &SearchFallback) -> String {
    let mut out = String::from("Automatic verification is unavailable. Try searching manually:\n");
    for query in &fallback.queries {
        let _ = writeln!(out, "- {query}");
    }
    let _ = writeln!(out, "\nSearch: {}", fallback.search_url);
    out
}

fn retry_after(err: &VeritasError) -> Option<Duration> {
    match err {
        VeritasError::Dispatch(err) => err.retry_after(),
        _ => None,
    }
}

/// Whole seconds, rounded up so a sub-second hint never reads as "0 seconds".
fn retry_secs(retry_after: Option<Duration>) -> u64 {
    retry_after.map_or(DEFAULT_RETRY_SECS, |delay| {
        let secs = delay.as_secs() + u64::from(delay.subsec_nanos() > 0);
        secs.max(1)
    })
}
