//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API operations the
//! create pipeline needs: verifying the caller's credential, searching the
//! track catalog, and creating and filling playlists. It handles all HTTP
//! communication and JSON decoding, leaving orchestration to the endpoint
//! handler.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! covers one domain of Spotify API functionality:
//!
//! ```text
//! Endpoint handler (api::create)
//!          ↓
//! Spotify Integration Layer
//!     ├── User Identity (credential probe, current user)
//!     ├── Track Search (catalog query, popularity selection)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Credential Model
//!
//! Every request to `/create` carries its own caller-supplied access token,
//! so a fresh [`SpotifyClient`] is constructed per request and dropped when
//! the response is sent. There is no shared client instance and therefore no
//! cross-request credential race; concurrent requests never observe each
//! other's token.
//!
//! ## API Coverage
//!
//! - `GET /me` - identity of the authenticated user, doubles as the
//!   credential probe
//! - `GET /search` - track catalog search
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - append tracks
//!
//! ## Error Types
//!
//! Client methods return `Result<_, reqwest::Error>`; callers translate
//! those into the [`crate::error::ApiError`] taxonomy at the orchestration
//! boundary.

pub mod playlist;
pub mod search;
pub mod user;

use reqwest::Client;

/// Spotify Web API client scoped to a single request.
///
/// Wraps the base API URL from configuration and the caller-supplied access
/// token. Cloning is cheap (the underlying reqwest client is reference
/// counted), which lets the search fan-out hand one clone to each spawned
/// task.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    pub(crate) api_url: String,
    pub(crate) token: String,
    pub(crate) client: Client,
}

impl SpotifyClient {
    /// Creates a client for one request, bound to `token`.
    pub fn new(api_url: &str, token: String) -> Self {
        SpotifyClient {
            api_url: api_url.to_string(),
            token,
            client: Client::new(),
        }
    }
}
