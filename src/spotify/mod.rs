//! Spotify Web API integration.
//!
//! Covers the three concerns the playlist populator needs from Spotify:
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge generation, browser
//!   launch, local callback handling, token exchange and persistence.
//! - [`search`] - Album resolution: matching an `"Artist - Album"` candidate
//!   (or a bare artist name in band mode) to a catalog album and its tracks.
//! - [`playlist`] - Playlist reconciliation: reading the current playlist
//!   contents and appending only track URIs that are not yet present.
//!
//! All calls go through [`SpotifyClient`], which owns the HTTP client and a
//! [`TokenManager`] so each request carries a fresh bearer token. Non-success
//! statuses surface as errors holding the raw response body.

use reqwest::Client;

use crate::management::TokenManager;

pub mod auth;
pub mod playlist;
pub mod search;

pub struct SpotifyClient {
    http: Client,
    tokens: TokenManager,
}

impl SpotifyClient {
    /// Builds a client from the token cache written by `spodcli auth`.
    pub async fn from_saved_token() -> Result<Self, String> {
        let tokens = TokenManager::load().await?;
        Ok(SpotifyClient {
            http: Client::new(),
            tokens,
        })
    }

    /// Returns a valid access token, refreshing it first when close to
    /// expiry.
    pub(crate) async fn bearer(&mut self) -> String {
        self.tokens.get_valid_token().await
    }
}
