//! HTTP endpoints for the local OAuth callback server.
//!
//! The server only exists for the duration of `spodcli auth`:
//!
//! - [`callback`] finishes the PKCE flow by exchanging the authorization
//!   code Spotify redirects back with for an access token.
//! - [`health`] reports liveness and the build version.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
