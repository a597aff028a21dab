use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One result row of a Discogs database search.
///
/// The `title` field carries both names as `"Artist - Album"`, possibly with
/// a ` (<digits>)` disambiguation suffix appended by Discogs when several
/// distinct entities share a name. Fields that Discogs omits for some
/// entries default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscogsRelease {
    pub title: String,
    #[serde(default)]
    pub artist: Vec<String>,
    #[serde(default)]
    pub community: DiscogsCommunity,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub master_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscogsCommunity {
    #[serde(default)]
    pub have: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscogsSearchResponse {
    #[serde(default)]
    pub results: Vec<DiscogsRelease>,
    #[serde(default)]
    pub pagination: DiscogsPagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscogsPagination {
    #[serde(default)]
    pub urls: DiscogsPageUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscogsPageUrls {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscogsMasterResponse {
    pub year: i32,
}

/// A deduplicated, normalized artist/album pair awaiting Spotify resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAlbum {
    pub artist: String,
    pub album: String,
}

impl fmt::Display for CandidateAlbum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.album)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbumsResponse {
    pub albums: SearchAlbumItems,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbumItems {
    pub items: Vec<SearchAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAlbum {
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    pub name: String,
    pub release_date: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub name: String,
}

/// A Spotify album selected for a candidate, ready for track listing.
#[derive(Debug, Clone)]
pub struct AlbumMatch {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTracksResponse {
    pub tracks: TrackItems,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItems {
    pub items: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}
