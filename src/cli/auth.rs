use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

/// Runs the OAuth authorization flow and persists the obtained token.
///
/// The shared state carries the PKCE verifier to the callback handler and
/// the token back out of it.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}
