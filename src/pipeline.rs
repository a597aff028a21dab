//! Discovery-to-playlist pipeline orchestration.
//!
//! Two logical activities run concurrently: the discovery producer walks
//! Discogs search pages, filters each release and pushes candidates into an
//! unbounded channel; the consumer resolves one candidate at a time against
//! Spotify and appends its new tracks. The channel keeps a slow resolution
//! from ever blocking discovery pagination, while the single consumer keeps
//! append order deterministic relative to discovery order.
//!
//! Error policy: discovery, master-year lookups and the initial playlist
//! snapshot are run-fatal; a resolve+append step gets three attempts with a
//! fixed pause in between, then the album is dropped and the run continues.

use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    time::sleep,
};

use crate::{
    Res,
    discogs::DiscogsClient,
    filter::StyleFilter,
    info,
    spotify::{SpotifyClient, playlist::PlaylistTrackSet},
    success,
    types::{CandidateAlbum, DiscogsSearchResponse},
    utils, warning,
};

/// Attempts per album before it is permanently dropped.
pub const MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts for the same album.
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Parameters of one style/year sync run.
pub struct SyncParams {
    pub playlist_id: String,
    pub style: String,
    pub year: String,
    pub excluded_styles: Vec<String>,
    pub verbose: bool,
}

/// A paginated source of catalog search results and master-year lookups.
///
/// [`DiscogsClient`] is the production impl; the seam exists so the
/// discovery loop in [`discover_candidates`] can be exercised without a
/// network, the same way [`ResolveStep`] covers the consumer side.
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    async fn search_page(
        &self,
        style: &str,
        year: &str,
        cursor: Option<&str>,
    ) -> Res<DiscogsSearchResponse>;

    async fn master_year(&self, master_url: &str) -> Res<i32>;
}

impl ReleaseSource for DiscogsClient {
    async fn search_page(
        &self,
        style: &str,
        year: &str,
        cursor: Option<&str>,
    ) -> Res<DiscogsSearchResponse> {
        DiscogsClient::search_page(self, style, year, cursor).await
    }

    async fn master_year(&self, master_url: &str) -> Res<i32> {
        DiscogsClient::master_year(self, master_url).await
    }
}

/// One unit of consumer work: resolve a candidate and append its tracks.
///
/// The seam exists so the retry loop in [`drain_candidates`] can be
/// exercised without a network.
#[allow(async_fn_in_trait)]
pub trait ResolveStep {
    async fn attempt(&mut self, album: &CandidateAlbum) -> Res<()>;
}

/// Production resolve+append step: Spotify resolution, track-set
/// reconciliation and the playlist mutation.
pub struct PlaylistAppender {
    pub spotify: SpotifyClient,
    pub playlist_id: String,
    pub year: Option<String>,
    pub tracks: PlaylistTrackSet,
}

impl ResolveStep for PlaylistAppender {
    async fn attempt(&mut self, album: &CandidateAlbum) -> Res<()> {
        let Some(matched) = self
            .spotify
            .find_album(album, self.year.as_deref())
            .await?
        else {
            info!("No match for {}", album);
            return Ok(());
        };

        let uris = self.spotify.album_tracks(&matched.href).await?;
        let new_uris = self.tracks.missing(&uris);
        if new_uris.is_empty() {
            info!("No new tracks to add for {}", album);
            return Ok(());
        }

        self.spotify
            .append_tracks(&self.playlist_id, &new_uris)
            .await?;
        self.tracks.commit(&new_uris);
        success!("Added {} tracks to playlist for {}", new_uris.len(), album);
        Ok(())
    }
}

/// Consumes candidates until the channel closes, retrying each one's
/// resolve+append step up to `attempts` times with `delay` in between.
///
/// A step that exhausts its attempts is logged and dropped; the loop always
/// proceeds to the next album. Returns the number of dropped albums.
pub async fn drain_candidates<S: ResolveStep>(
    rx: &mut UnboundedReceiver<CandidateAlbum>,
    step: &mut S,
    attempts: u32,
    delay: Duration,
) -> u32 {
    let mut dropped = 0;
    while let Some(album) = rx.recv().await {
        let mut attempt = 1;
        loop {
            match step.attempt(&album).await {
                Ok(()) => break,
                Err(e) => {
                    warning!("Attempt {} failed for {}: {}", attempt, album, e);
                    if attempt >= attempts {
                        info!("Giving up on {}", album);
                        dropped += 1;
                        break;
                    }
                    attempt += 1;
                    sleep(delay).await;
                }
            }
        }
    }
    dropped
}

/// Walks Discogs search pages for the target style and year and forwards
/// every surviving release as a candidate.
///
/// Applies the style filter, checks master-year consistency, normalizes the
/// title and deduplicates against the per-run seen-title set. Pagination is
/// exhausted: the loop only ends when a page carries no next cursor. Any
/// fetch or lookup failure aborts discovery. Returns the number of
/// candidates forwarded.
pub async fn discover_candidates<C: ReleaseSource>(
    catalog: &C,
    filter: &StyleFilter,
    params: &SyncParams,
    tx: UnboundedSender<CandidateAlbum>,
) -> Res<usize> {
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut forwarded = 0;
    let mut page_number = 1;

    loop {
        info!(
            "Fetching search page {} for {} / {}",
            page_number, params.style, params.year
        );
        let page = catalog
            .search_page(&params.style, &params.year, cursor.as_deref())
            .await?;

        for release in page.results {
            if let Err(rejection) = filter.evaluate(&release) {
                if params.verbose {
                    info!("Skipping {}: {}", release.title, rejection);
                }
                continue;
            }

            // A master reference means this listing may be a re-listing of
            // an older work under a newer pressing year.
            if let Some(master_url) = release.master_url.as_deref().filter(|u| !u.is_empty()) {
                let master_year = catalog.master_year(master_url).await?;
                if master_year.to_string() != params.year {
                    if params.verbose {
                        info!(
                            "Skipping {}: master release year {} does not match {}",
                            release.title, master_year, params.year
                        );
                    }
                    continue;
                }
            }

            let title = utils::normalize_title(&release.title);
            if !seen_titles.insert(title.clone()) {
                continue;
            }

            let Some((artist, album)) = utils::split_candidate(&title) else {
                if params.verbose {
                    info!("Skipping {}: no artist separator in title", title);
                }
                continue;
            };

            forwarded += 1;
            tx.send(CandidateAlbum { artist, album })
                .map_err(|_| "album resolver stopped unexpectedly")?;
        }

        cursor = page.pagination.urls.next;
        if cursor.is_none() {
            break;
        }
        page_number += 1;
    }

    Ok(forwarded)
}

/// Runs a full style/year sync: playlist snapshot, discovery producer,
/// resolve/append consumer.
pub async fn run_sync(
    discogs: DiscogsClient,
    mut spotify: SpotifyClient,
    params: SyncParams,
) -> Res<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching current playlist tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let snapshot = match spotify.playlist_tracks(&params.playlist_id).await {
        Ok(snapshot) => {
            pb.finish_and_clear();
            snapshot
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    info!("Got {} tracks in playlist", snapshot.len());

    let filter = StyleFilter::new(&params.style, params.excluded_styles.clone());
    let (tx, mut rx) = unbounded_channel::<CandidateAlbum>();

    let mut appender = PlaylistAppender {
        spotify,
        playlist_id: params.playlist_id.clone(),
        year: Some(params.year.clone()),
        tracks: PlaylistTrackSet::new(snapshot),
    };
    let consumer = tokio::spawn(async move {
        drain_candidates(&mut rx, &mut appender, MAX_ATTEMPTS, RETRY_DELAY).await
    });

    match discover_candidates(&discogs, &filter, &params, tx).await {
        Ok(forwarded) => {
            let dropped = consumer.await?;
            if dropped > 0 {
                warning!("{} of {} albums could not be added", dropped, forwarded);
            }
            info!("Processed {} candidate albums", forwarded);
            Ok(())
        }
        Err(e) => {
            // Discovery failures abort the run; buffered albums are not
            // worth finishing against a broken catalog pass.
            consumer.abort();
            Err(e)
        }
    }
}
