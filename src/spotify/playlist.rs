//! Playlist reconciliation: snapshot of current contents plus append-only
//! mutations for tracks not yet present.

use std::collections::HashSet;

use reqwest::StatusCode;

use crate::{
    Res, config,
    spotify::SpotifyClient,
    types::{AddTracksRequest, PlaylistTracksResponse},
    utils,
};

/// The set of track URIs known to be in the destination playlist.
///
/// Built once from the pre-run snapshot and never refetched. After every
/// successful append the submitted URIs are committed to the set, so a
/// later album in the same run that shares a track does not re-submit it.
#[derive(Debug, Default)]
pub struct PlaylistTrackSet {
    present: HashSet<String>,
}

impl PlaylistTrackSet {
    pub fn new(uris: Vec<String>) -> Self {
        PlaylistTrackSet {
            present: uris.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.present.contains(uri)
    }

    /// Filters an album's track list down to the URIs not yet in the
    /// playlist, preserving album order and dropping duplicates within the
    /// list itself.
    pub fn missing(&self, uris: &[String]) -> Vec<String> {
        let mut picked: HashSet<&str> = HashSet::new();
        uris.iter()
            .filter(|uri| !self.present.contains(*uri) && picked.insert(uri.as_str()))
            .cloned()
            .collect()
    }

    /// Records URIs as present after a successful append. Must only be
    /// called once the mutation has been acknowledged.
    pub fn commit(&mut self, uris: &[String]) {
        for uri in uris {
            self.present.insert(uri.clone());
        }
    }
}

impl SpotifyClient {
    /// Fetches the full current contents of a playlist.
    ///
    /// Follows the `next` cursor until the service reports the end. Local
    /// tracks without a URI are skipped. Any page failure is fatal to the
    /// run, so errors propagate unretried.
    pub async fn playlist_tracks(&mut self, playlist_id: &str) -> Res<Vec<String>> {
        let mut tracks = Vec::new();
        let mut url = format!(
            "{}/playlists/{}/tracks?limit=100",
            config::spotify_apiurl(),
            playlist_id
        );

        loop {
            let token = self.bearer().await;
            let response = self.http.get(&url).bearer_auth(&token).send().await?;
            let page: PlaylistTracksResponse =
                utils::expect_json(response, StatusCode::OK).await?;

            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .map(|t| t.uri),
            );

            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(tracks)
    }

    /// Appends track URIs to a playlist in a single mutation.
    ///
    /// Spotify acknowledges the append with `201 Created`; anything else is
    /// an error carrying the response body.
    pub async fn append_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let token = self.bearer().await;
        let url = format!(
            "{}/playlists/{}/tracks",
            config::spotify_apiurl(),
            playlist_id
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&AddTracksRequest {
                uris: uris.to_vec(),
            })
            .send()
            .await?;

        let _: serde_json::Value = utils::expect_json(response, StatusCode::CREATED).await?;
        Ok(())
    }
}
