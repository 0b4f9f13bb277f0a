use crate::{
    error::ApiError,
    success,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse, Track,
    },
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Creates a new private playlist under the given user.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<CreatePlaylistResponse, reqwest::Error> {
        let api_url = format!("{uri}/users/{user_id}/playlists", uri = &self.api_url);
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Created by tunesmith.".to_string(),
            public: false,
            collaborative: false,
        };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<CreatePlaylistResponse>().await
    }

    /// Appends tracks to a playlist, preserving the order of `uris`.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Result<AddTracksResponse, reqwest::Error> {
        let api_url = format!("{uri}/playlists/{playlist_id}/tracks", uri = &self.api_url);
        let request = AddTracksRequest { uris };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<AddTracksResponse>().await
    }
}

/// Converts a track id into the provider's URI form.
pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

/// Creates a playlist for the authenticated user and fills it with the
/// resolved tracks.
///
/// Steps, in order: resolve the current user's id, create the playlist under
/// that user, append all track URIs in the given order. Each step can fail
/// and aborts the remaining ones, surfacing `ApiError::PlaylistCreation`.
/// There is no rollback: a playlist created before a later step fails stays
/// on the provider.
pub async fn build_playlist(
    client: &SpotifyClient,
    name: &str,
    tracks: &[Track],
) -> Result<CreatePlaylistResponse, ApiError> {
    let user = client
        .current_user()
        .await
        .map_err(|e| ApiError::PlaylistCreation(e.to_string()))?;

    let playlist = client
        .create_playlist(&user.id, name)
        .await
        .map_err(|e| ApiError::PlaylistCreation(e.to_string()))?;

    let uris = tracks.iter().map(|track| track_uri(&track.id)).collect();
    client
        .add_tracks(&playlist.id, uris)
        .await
        .map_err(|e| ApiError::PlaylistCreation(e.to_string()))?;

    success!("Created playlist '{}' and added {} tracks", name, tracks.len());

    Ok(playlist)
}
