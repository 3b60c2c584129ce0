//! Gemini REST backend for the dispatcher.

mod api;
mod classify;
mod client;
mod key;

pub use api::GeminiApi;
pub use classify::{MappingKind, UPSTREAM_BODY_PREVIEW_CHARS, classify_upstream_error};
pub use client::GeminiClient;
pub use key::ApiKey;
