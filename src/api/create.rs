use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    error::ApiError,
    openai,
    server::AppState,
    spotify::{self, SpotifyClient},
    types::{FieldViolation, PlaylistRequest, Track},
    validate,
};

/// Handles `POST /create`.
///
/// The request walks a fixed sequence of stages, each of which can
/// short-circuit into an error response:
///
/// 1. Validate the body shape; violations answer 400 with the list.
/// 2. Probe the caller's Spotify credential; rejection answers 401.
/// 3. Ask the completion service for song suggestions.
/// 4. Resolve each suggestion to its most popular catalog track.
/// 5. Create the playlist and append the resolved tracks.
/// 6. Answer 200 with the resolved track list as JSON.
///
/// Upstream failures in stages 3-5 abort the request; external state
/// already created (a playlist from stage 5's create step, for instance)
/// is left as-is on the provider.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let violations = validate::validate_create_request(&body);
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let request: PlaylistRequest = serde_json::from_value(body).map_err(|e| {
        ApiError::Validation(vec![FieldViolation {
            field: "body".to_string(),
            message: e.to_string(),
        }])
    })?;

    // Fresh client per request; the caller's token never outlives this handler.
    let spotify = SpotifyClient::new(&state.config.spotify_api_url, request.access_token.clone());

    if !spotify.verify_authorization().await {
        return Err(ApiError::Unauthorized);
    }

    let reply = state
        .openai
        .suggest_songs(&request.playlist_description, request.number_of_songs)
        .await?;
    let suggestions = openai::parse_suggestions(&reply);

    let tracks = spotify::search::resolve_tracks(&spotify, suggestions).await?;

    spotify::playlist::build_playlist(&spotify, &request.playlist_name, &tracks).await?;

    Ok(Json(tracks))
}
