use std::{path::PathBuf, time::Duration};

use tokio::time::sleep;

use crate::{
    error, info,
    pipeline::{PlaylistAppender, ResolveStep},
    spotify::{SpotifyClient, playlist::PlaylistTrackSet},
    success,
    types::CandidateAlbum,
    utils,
};

/// Pause between bands, to stay under the search rate limit.
const BAND_DELAY: Duration = Duration::from_secs(1);

/// Adds the latest album of every artist listed in `file` to a playlist.
///
/// Unlike the style/year pipeline, this mode treats every request failure
/// as fatal to the whole run: a band that cannot be looked up or appended
/// terminates the process. No-match outcomes are still just skips.
pub async fn bands(playlist_id: String, file: PathBuf) {
    let bands = match utils::read_bands_from_file(&file).await {
        Ok(bands) => bands,
        Err(e) => error!("Failed to read bands from {}: {}", file.display(), e),
    };

    let mut spotify = match SpotifyClient::from_saved_token().await {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Failed to load token. Please run spodcli auth\n Error: {}",
                e
            );
        }
    };

    let snapshot = match spotify.playlist_tracks(&playlist_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => error!("Failed to fetch playlist tracks: {}", e),
    };
    info!("Got {} tracks in playlist", snapshot.len());

    let mut appender = PlaylistAppender {
        spotify,
        playlist_id,
        year: None,
        tracks: PlaylistTrackSet::new(snapshot),
    };

    for band in bands {
        let latest = match appender.spotify.latest_album_for_band(&band).await {
            Ok(Some(album)) => album,
            Ok(None) => {
                info!("No albums found for {}", band);
                sleep(BAND_DELAY).await;
                continue;
            }
            Err(e) => error!("Failed to look up {}: {}", band, e),
        };
        info!("Latest album from {} is {}", band, latest);

        let candidate = CandidateAlbum {
            artist: band,
            album: latest,
        };
        if let Err(e) = appender.attempt(&candidate).await {
            error!("Failed to add {}: {}", candidate, e);
        }

        sleep(BAND_DELAY).await;
    }

    success!("Band file processed");
}
