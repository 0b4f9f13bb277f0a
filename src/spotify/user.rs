use reqwest::StatusCode;

use crate::{types::CurrentUserResponse, warning};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the identity of the authenticated user.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(CurrentUserResponse)` - Profile of the user the token belongs to
    /// - `Err(reqwest::Error)` - Network error or non-success API status
    ///
    /// A rejected token surfaces as an error whose status is 401; callers
    /// that only need a yes/no answer should use
    /// [`SpotifyClient::verify_authorization`] instead.
    pub async fn current_user(&self) -> Result<CurrentUserResponse, reqwest::Error> {
        let api_url = format!("{uri}/me", uri = &self.api_url);

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        response.json::<CurrentUserResponse>().await
    }

    /// Probes whether the caller-supplied access token is usable.
    ///
    /// A successful `/me` lookup means the credential is valid. A 401 means
    /// it was rejected. Any other failure is reported on the operational
    /// stream and treated as invalid as well, so an unreachable or
    /// misbehaving provider can never let a request through unchecked.
    pub async fn verify_authorization(&self) -> bool {
        match self.current_user().await {
            Ok(_) => true,
            Err(err) => {
                if err.status() != Some(StatusCode::UNAUTHORIZED) {
                    warning!("Error checking Spotify access token: {}", err);
                }
                false
            }
        }
    }
}
