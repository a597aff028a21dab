use crate::{
    discogs::DiscogsClient,
    error,
    pipeline::{self, SyncParams},
    spotify::SpotifyClient,
    success,
};

/// Populates a playlist from a Discogs style/year search.
///
/// Per-album resolution failures are retried and eventually dropped inside
/// the pipeline; only discovery, master-year lookups and the initial
/// playlist snapshot are fatal here.
pub async fn sync(
    playlist_id: String,
    style: String,
    year: String,
    excluded_styles: Vec<String>,
    verbose: bool,
) {
    let spotify = match SpotifyClient::from_saved_token().await {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Failed to load token. Please run spodcli auth\n Error: {}",
                e
            );
        }
    };
    let discogs = DiscogsClient::from_env();

    let params = SyncParams {
        playlist_id,
        style: style.clone(),
        year: year.clone(),
        excluded_styles,
        verbose,
    };

    match pipeline::run_sync(discogs, spotify, params).await {
        Ok(()) => success!("Playlist sync for {} / {} finished", style, year),
        Err(e) => error!("Playlist sync failed: {}", e),
    }
}
