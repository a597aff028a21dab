//! Album resolution against the Spotify catalog.

use reqwest::StatusCode;

use crate::{
    Res, config,
    spotify::SpotifyClient,
    types::{AlbumMatch, AlbumTracksResponse, CandidateAlbum, SearchAlbumsResponse},
    utils,
};

impl SpotifyClient {
    /// Resolves a candidate to a Spotify album.
    ///
    /// Searches for `"Artist - Album"` and takes the first result whose
    /// release date starts with the target year (when one is given) and
    /// whose artist and album names both fuzzy-match the candidate. Returns
    /// `Ok(None)` when nothing qualifies; that is a skip for the caller,
    /// not an error.
    pub async fn find_album(
        &mut self,
        candidate: &CandidateAlbum,
        year: Option<&str>,
    ) -> Res<Option<AlbumMatch>> {
        let token = self.bearer().await;
        let query = candidate.to_string();
        let response = self
            .http
            .get(format!("{}/search", config::spotify_apiurl()))
            .query(&[("q", query.as_str()), ("type", "album")])
            .bearer_auth(&token)
            .send()
            .await?;
        let results: SearchAlbumsResponse = utils::expect_json(response, StatusCode::OK).await?;

        for album in results.albums.items {
            if let Some(year) = year {
                if !album.release_date.starts_with(year) {
                    continue;
                }
            }
            let artist_matches = album
                .artists
                .first()
                .map(|a| utils::are_similar(&a.name, &candidate.artist))
                .unwrap_or(false);
            if artist_matches && utils::are_similar(&album.name, &candidate.album) {
                return Ok(Some(AlbumMatch {
                    name: album.name,
                    href: album.href,
                }));
            }
        }

        Ok(None)
    }

    /// Fetches the ordered track-URI list for a matched album.
    ///
    /// `href` is the album resource URL returned by the search endpoint.
    pub async fn album_tracks(&mut self, href: &str) -> Res<Vec<String>> {
        let token = self.bearer().await;
        let response = self.http.get(href).bearer_auth(&token).send().await?;
        let album: AlbumTracksResponse = utils::expect_json(response, StatusCode::OK).await?;
        Ok(album.tracks.items.into_iter().map(|t| t.uri).collect())
    }

    /// Returns the name of an artist's most recent album, if they have any.
    ///
    /// Queries by artist name alone, sorts the results by release date
    /// descending and returns the first album whose artist fuzzy-matches the
    /// query. When no artist matches well enough, the overall most recent
    /// album is returned as a fallback.
    pub async fn latest_album_for_band(&mut self, artist: &str) -> Res<Option<String>> {
        let token = self.bearer().await;
        let query = format!("artist:{}", artist);
        let response = self
            .http
            .get(format!("{}/search", config::spotify_apiurl()))
            .query(&[("q", query.as_str()), ("type", "album")])
            .bearer_auth(&token)
            .send()
            .await?;
        let results: SearchAlbumsResponse = utils::expect_json(response, StatusCode::OK).await?;

        let mut albums = results.albums.items;
        albums.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        if albums.is_empty() {
            return Ok(None);
        }

        for album in &albums {
            let artist_matches = album
                .artists
                .first()
                .map(|a| utils::are_similar(&a.name, artist))
                .unwrap_or(false);
            if artist_matches {
                return Ok(Some(album.name.clone()));
            }
        }

        Ok(Some(albums[0].name.clone()))
    }
}
