//! Configuration management for the tunesmith server.
//!
//! All configuration is read from environment variables (optionally loaded
//! from a `.env` file by `main`) exactly once at startup and gathered into an
//! explicit [`Config`] value that is handed to the server. Nothing reads the
//! environment after startup, which keeps request handling deterministic and
//! lets tests construct a `Config` pointing at local mock upstreams.

use std::{env, path::PathBuf};

use crate::Res;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_STATIC_DIR: &str = "frontend/build";

/// Runtime configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`SERVER_ADDRESS`).
    pub server_address: String,
    /// Access key for the chat-completion service (`OPENAI_API_KEY`, required).
    pub openai_api_key: String,
    /// Base URL of the chat-completion API (`OPENAI_API_URL`).
    pub openai_api_url: String,
    /// Model identifier sent with every completion request (`OPENAI_MODEL`).
    pub openai_model: String,
    /// Base URL of the Spotify Web API (`SPOTIFY_API_URL`).
    pub spotify_api_url: String,
    /// Directory holding the prebuilt front-end bundle (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl Config {
    /// Resolves the configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is the only required variable; everything else falls
    /// back to a sensible default. Returns an error naming the missing
    /// variable so the caller can fail fast at startup.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// println!("listening on {}", config.server_address);
    /// ```
    pub fn from_env() -> Res<Self> {
        let openai_api_key =
            env::var("OPENAI_API_KEY").map_err(|_| "OPENAI_API_KEY must be set")?;

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string()),
            openai_api_key,
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            spotify_api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}
