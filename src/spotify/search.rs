use crate::{
    error::ApiError,
    types::{SearchTracksResponse, SongSuggestion, Track},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Runs a track search against the Spotify catalog.
    ///
    /// # Arguments
    ///
    /// * `query` - Search query, typically of the form
    ///   `track:<title> artist:<artist>`
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(SearchTracksResponse)` - Page of matching tracks (may be empty)
    /// - `Err(reqwest::Error)` - Network error or non-success API status
    pub async fn search_tracks(&self, query: &str) -> Result<SearchTracksResponse, reqwest::Error> {
        let api_url = format!("{uri}/search", uri = &self.api_url);

        let response = self
            .client
            .get(&api_url)
            .query(&[("q", query), ("type", "track")])
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        response.json::<SearchTracksResponse>().await
    }
}

/// Picks the track with the highest popularity score.
///
/// The selection starts at the first track and only a strictly greater
/// popularity advances it, so ties are won by the earliest candidate.
/// Returns `None` for an empty result set.
pub fn most_popular(mut tracks: Vec<Track>) -> Option<Track> {
    if tracks.is_empty() {
        return None;
    }

    let mut best = 0;
    let mut highest_popularity = 0;
    for (index, track) in tracks.iter().enumerate() {
        if track.popularity > highest_popularity {
            highest_popularity = track.popularity;
            best = index;
        }
    }

    Some(tracks.swap_remove(best))
}

/// Resolves each suggestion to its most popular catalog match.
///
/// All searches are spawned before any is awaited, then joined in
/// suggestion order so the output sequence mirrors the input. Suggestions
/// whose search returns no tracks, or whose selected track carries an empty
/// id, contribute nothing to the result. Any search failure aborts the whole
/// batch with `ApiError::TrackFetch`; there is no partial-success mode.
pub async fn resolve_tracks(
    client: &SpotifyClient,
    suggestions: Vec<SongSuggestion>,
) -> Result<Vec<Track>, ApiError> {
    let mut handles = Vec::with_capacity(suggestions.len());

    for suggestion in suggestions {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let query = format!(
                "track:{title} artist:{artist}",
                title = suggestion.title,
                artist = suggestion.artist
            );
            client
                .search_tracks(&query)
                .await
                .map(|response| most_popular(response.tracks.items))
        }));
    }

    let mut resolved = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(Some(track))) => {
                if !track.id.is_empty() {
                    resolved.push(track);
                }
            }
            Ok(Ok(None)) => {}
            Ok(Err(err)) => return Err(ApiError::TrackFetch(err.to_string())),
            Err(err) => return Err(ApiError::TrackFetch(err.to_string())),
        }
    }

    Ok(resolved)
}
