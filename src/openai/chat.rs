use crate::{
    error::ApiError,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SongSuggestion},
};

use super::OpenAiClient;

impl OpenAiClient {
    /// Sends one chat-completion request and returns the decoded response.
    ///
    /// # Arguments
    ///
    /// * `messages` - Ordered list of role-tagged conversation turns
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(ChatCompletionResponse)` - Decoded completion with its choices
    /// - `Err(ApiError)` - Transport failure, non-success status, or a body
    ///   that could not be decoded
    ///
    /// A non-success HTTP status is surfaced as `ApiError::CompletionFailed`
    /// carrying the status so the handler can report which status the
    /// completion service answered with.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, ApiError> {
        let api_url = format!("{uri}/chat/completions", uri = &self.api_url);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
        };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::CompletionRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::CompletionFailed(status));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ApiError::CompletionRequest(e.to_string()))
    }

    /// Asks the completion service for `count` song/artist suggestions
    /// matching `description` and returns the raw reply text.
    ///
    /// The conversation is scripted: a system instruction fixes the output
    /// grammar to `"<title>; <artist>"` lines (with two example lines
    /// embedded), a canned assistant turn asks what the user wants to hear,
    /// and the description is the final user turn.
    ///
    /// Fails with `ApiError::NoCompletionContent` if the first choice carries
    /// no message content.
    pub async fn suggest_songs(&self, description: &str, count: u32) -> Result<String, ApiError> {
        let completion = self.chat(suggestion_messages(description, count)).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ApiError::NoCompletionContent)
    }
}

fn suggestion_messages(description: &str, count: u32) -> Vec<ChatMessage> {
    let system = format!(
        "You are a song suggester that can only reply with answers of the following structure:\n\
         So What; Miles Davis\n\
         Another Brick in the Wall; Pink Floyd\n\
         Answer each question with {count} song-artist pairs, don't say anything else, just list"
    );

    vec![
        ChatMessage {
            role: "system".to_string(),
            content: system,
        },
        ChatMessage {
            role: "assistant".to_string(),
            content: "What kind of music would you like to listen to?".to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: description.to_string(),
        },
    ]
}

/// Parses a raw completion reply into (title, artist) suggestions.
///
/// Splits on line breaks, drops empty lines, splits each remaining line on
/// the first semicolon, and trims whitespace from both halves. A line
/// without a semicolon yields a suggestion with an empty artist; the
/// resolver queries the catalog with that value regardless.
pub fn parse_suggestions(raw: &str) -> Vec<SongSuggestion> {
    raw.lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (title, artist) = line.split_once(';').unwrap_or((line, ""));
            SongSuggestion {
                title: title.trim().to_string(),
                artist: artist.trim().to_string(),
            }
        })
        .collect()
}
