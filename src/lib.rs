//! Tunesmith service library.
//!
//! Tunesmith exposes a single HTTP endpoint that takes a natural-language
//! playlist description, asks a chat-completion service for song/artist
//! suggestions, resolves them against the Spotify Web API, and builds a
//! playlist for the authenticated user from the results.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint handlers
//! - `config` - Configuration gathered from environment variables at startup
//! - `error` - Request error taxonomy and HTTP response mapping
//! - `openai` - Chat-completion client and suggestion parsing
//! - `server` - Router assembly and HTTP server startup
//! - `spotify` - Spotify Web API client (search, user, playlists)
//! - `types` - Data structures and wire type definitions
//! - `validate` - Request body validation

pub mod api;
pub mod config;
pub mod error;
pub mod openai;
pub mod server;
pub mod spotify;
pub mod types;
pub mod validate;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// can cross async task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Reserved for unrecoverable startup failures; request handling never goes
/// through this macro.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// This is the operational stream for per-request failures: upstream errors
/// are reported here before being turned into an HTTP error response.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
