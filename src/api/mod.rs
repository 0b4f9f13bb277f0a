//! # API Module
//!
//! This module provides the HTTP endpoints of the tunesmith server.
//!
//! ## Endpoints
//!
//! ### Playlist creation
//!
//! - [`create`] - Handles `POST /create`: validates the request body,
//!   verifies the caller's Spotify credential, obtains song suggestions from
//!   the chat-completion service, resolves them against the catalog, and
//!   builds the playlist. Responds with the resolved track list.
//!
//! ### Monitoring
//!
//! - [`health`] - Health check endpoint returning application status and
//!   version information for monitoring systems.
//!
//! Each endpoint is an async function that plugs into Axum's routing system;
//! the router itself is assembled in [`crate::server`].

mod create;
mod health;

pub use create::create;
pub use health::health;
