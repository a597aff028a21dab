//! Configuration management for the playlist populator.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the platform-specific local data directory
//! 3. `.env` file in the working directory

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file.
///
/// Looks for `spodcli/.env` in the platform-specific local data directory
/// (e.g. `~/.local/share/spodcli/.env` on Linux) and falls back to a `.env`
/// file in the working directory. Missing files are not an error; the
/// accessor functions below fail when a required variable is absent.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spodcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    } else {
        dotenv::dotenv().ok();
    }
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID used for the PKCE flow.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI registered with Spotify.
///
/// Must point at the local callback server started during `spodcli auth`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the OAuth scope string requested during authorization.
///
/// Playlist mutation requires at least `playlist-modify-public` or
/// `playlist-modify-private`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the Discogs API base URL, e.g. `https://api.discogs.com`.
///
/// # Panics
///
/// Panics if the `DISCOGS_API_URL` environment variable is not set.
pub fn discogs_apiurl() -> String {
    env::var("DISCOGS_API_URL").expect("DISCOGS_API_URL must be set")
}

/// Returns the Discogs personal access token.
///
/// Discogs expects the token as a query parameter, not an authorization
/// header.
///
/// # Panics
///
/// Panics if the `DISCOGS_API_TOKEN` environment variable is not set.
pub fn discogs_token() -> String {
    env::var("DISCOGS_API_TOKEN").expect("DISCOGS_API_TOKEN must be set")
}
