use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{types::FieldViolation, warning};

/// Error taxonomy for the create endpoint.
///
/// Only `Validation` and `Unauthorized` are intentional client-facing
/// outcomes; the remaining variants are upstream failures that surface as
/// 502 Bad Gateway after being reported on the operational stream.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body does not match the declared shape.
    #[error("invalid request body")]
    Validation(Vec<FieldViolation>),

    /// Spotify rejected the caller-supplied access token.
    #[error("bad Spotify credentials")]
    Unauthorized,

    /// The completion request could not be sent or decoded.
    #[error("completion request failed: {0}")]
    CompletionRequest(String),

    /// The completion service answered with a non-success status.
    #[error("completion request failed with status: {0}")]
    CompletionFailed(StatusCode),

    /// The completion reply carried no usable message content.
    #[error("unable to obtain the content from the completion response")]
    NoCompletionContent,

    /// A catalog search failed; the whole resolution batch is aborted.
    #[error("track fetch failed: {0}")]
    TrackFetch(String),

    /// User lookup, playlist creation, or track addition failed.
    #[error("playlist creation failed: {0}")]
    PlaylistCreation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json("Bad Spotify Credentials")).into_response()
            }
            other => {
                warning!("Request failed: {}", other);
                (StatusCode::BAD_GATEWAY, other.to_string()).into_response()
            }
        }
    }
}
