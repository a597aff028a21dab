//! Discogs-to-Spotify Playlist CLI Library
//!
//! This library implements a one-shot playlist populator: it searches the
//! Discogs catalog for releases of a given style and year, filters out
//! repressings and noise, resolves each surviving album against the Spotify
//! catalog, and appends the tracks that are not yet in the target playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `discogs` - Discogs catalog search client
//! - `filter` - Release filtering rules for catalog search results
//! - `management` - Token persistence and refresh
//! - `pipeline` - Discovery/resolution pipeline orchestration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (auth, search, playlists)
//! - `types` - Data structures and wire formats
//! - `utils` - String matching and other helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod discogs;
pub mod filter;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so the
/// same alias works across async task boundaries. HTTP failures are stored
/// as the raw response body text, which keeps upstream diagnostics intact.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Used for status updates and for skip lines: a release that fails
/// filtering or a candidate without a Spotify equivalent is informational,
/// never an error.
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
/// Reserved for run-fatal failures: discovery pagination errors, playlist
/// snapshot errors, and band-mode lookup failures terminate with a non-zero
/// status. Code after this macro never executes.
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
/// Used for recoverable issues such as a failed resolve attempt that will
/// be retried.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
