//! # Chat-Completion Integration Module
//!
//! This module talks to an OpenAI-style chat-completion API and turns its
//! free-text replies into structured song suggestions. It is the first of the
//! two external capabilities the create pipeline orchestrates.
//!
//! ## Overview
//!
//! A single scripted conversation is sent per request: a system instruction
//! that pins the reply grammar to `"<title>; <artist>"` lines, a scripted
//! assistant turn asking what the user wants to hear, and the caller's
//! playlist description as the final user turn. The reply content is parsed
//! line by line into [`crate::types::SongSuggestion`] pairs.
//!
//! ## Error Types
//!
//! - A transport or decode failure maps to `ApiError::CompletionRequest`
//! - A non-success HTTP status maps to `ApiError::CompletionFailed`
//! - A reply without message content maps to `ApiError::NoCompletionContent`
//!
//! The parser itself never fails: malformed lines degrade to suggestions with
//! an empty title or artist half and are resolved against the catalog as-is.

pub mod chat;

pub use chat::parse_suggestions;

use reqwest::Client;

use crate::config::Config;

/// Client for the chat-completion service.
///
/// Holds the service access key from [`Config`] for the lifetime of the
/// process; unlike the Spotify client there is no per-request credential, so
/// one instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub(crate) api_key: String,
    pub(crate) api_url: String,
    pub(crate) model: String,
    pub(crate) client: Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        OpenAiClient {
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            model: config.openai_model.clone(),
            client: Client::new(),
        }
    }
}
