use std::{collections::HashMap, time::Duration};

use spodcli::filter::StyleFilter;
use spodcli::pipeline::{
    ReleaseSource, ResolveStep, SyncParams, discover_candidates, drain_candidates,
};
use spodcli::spotify::playlist::PlaylistTrackSet;
use spodcli::types::{
    CandidateAlbum, DiscogsCommunity, DiscogsPageUrls, DiscogsPagination, DiscogsRelease,
    DiscogsSearchResponse,
};
use spodcli::Res;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

fn candidate(artist: &str, album: &str) -> CandidateAlbum {
    CandidateAlbum {
        artist: artist.to_string(),
        album: album.to_string(),
    }
}

fn uris(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// A step that fails a scripted number of times per album before succeeding,
// recording every attempt.
struct FlakyStep {
    failures_before_success: u32,
    seen: Vec<String>,
    succeeded: Vec<String>,
    attempts_for_current: u32,
    last_album: Option<CandidateAlbum>,
}

impl FlakyStep {
    fn new(failures_before_success: u32) -> Self {
        FlakyStep {
            failures_before_success,
            seen: Vec::new(),
            succeeded: Vec::new(),
            attempts_for_current: 0,
            last_album: None,
        }
    }
}

impl ResolveStep for FlakyStep {
    async fn attempt(&mut self, album: &CandidateAlbum) -> Res<()> {
        if self.last_album.as_ref() != Some(album) {
            self.last_album = Some(album.clone());
            self.attempts_for_current = 0;
        }
        self.attempts_for_current += 1;
        self.seen.push(album.to_string());

        if self.attempts_for_current <= self.failures_before_success {
            return Err("transient failure".into());
        }
        self.succeeded.push(album.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_retry_succeeds_on_third_attempt() {
    let (tx, mut rx) = unbounded_channel();
    tx.send(candidate("Sleep", "Dopesmoker")).unwrap();
    drop(tx);

    let mut step = FlakyStep::new(2);
    let dropped = drain_candidates(&mut rx, &mut step, 3, Duration::from_millis(1)).await;

    assert_eq!(dropped, 0);
    assert_eq!(step.seen.len(), 3);
    assert_eq!(step.succeeded, vec!["Sleep - Dopesmoker"]);
}

#[tokio::test]
async fn test_three_failures_drop_album_and_continue() {
    let (tx, mut rx) = unbounded_channel();
    tx.send(candidate("Doomed", "Cursed Album")).unwrap();
    tx.send(candidate("Om", "Advaitic Songs")).unwrap();
    drop(tx);

    // Fails more times than the attempt budget allows
    let mut step = FlakyStep::new(5);
    let dropped = drain_candidates(&mut rx, &mut step, 3, Duration::from_millis(1)).await;

    // First album exhausts its 3 attempts and is dropped; the run continues
    // and the second album gets its own 3 attempts
    assert_eq!(dropped, 2);
    assert_eq!(step.seen.len(), 6);
    assert_eq!(step.seen[0], "Doomed - Cursed Album");
    assert_eq!(step.seen[3], "Om - Advaitic Songs");
    assert!(step.succeeded.is_empty());
}

#[tokio::test]
async fn test_first_attempt_success_needs_no_retry() {
    let (tx, mut rx) = unbounded_channel();
    tx.send(candidate("Bell Witch", "Mirror Reaper")).unwrap();
    drop(tx);

    let mut step = FlakyStep::new(0);
    let dropped = drain_candidates(&mut rx, &mut step, 3, Duration::from_millis(1)).await;

    assert_eq!(dropped, 0);
    assert_eq!(step.seen.len(), 1);
}

#[test]
fn test_track_set_snapshot_filtering() {
    // Playlist already contains abc; a resolved album lists abc and def
    let set = PlaylistTrackSet::new(uris(&["spotify:track:abc"]));
    let album_tracks = uris(&["spotify:track:abc", "spotify:track:def"]);

    assert_eq!(set.missing(&album_tracks), uris(&["spotify:track:def"]));
}

#[test]
fn test_track_set_commit_prevents_resubmission_across_albums() {
    let mut set = PlaylistTrackSet::new(uris(&["spotify:track:abc"]));

    // First album appends def and ghi
    let first = uris(&["spotify:track:def", "spotify:track:ghi"]);
    let new_uris = set.missing(&first);
    assert_eq!(new_uris.len(), 2);
    set.commit(&new_uris);

    // Second album in the same run overlaps on def; only jkl is new even
    // though the playlist snapshot was never refetched
    let second = uris(&["spotify:track:def", "spotify:track:jkl"]);
    assert_eq!(set.missing(&second), uris(&["spotify:track:jkl"]));
}

#[test]
fn test_track_set_deduplicates_within_one_album() {
    let set = PlaylistTrackSet::new(Vec::new());
    let album_tracks = uris(&["spotify:track:a", "spotify:track:a", "spotify:track:b"]);

    assert_eq!(
        set.missing(&album_tracks),
        uris(&["spotify:track:a", "spotify:track:b"])
    );
}

#[test]
fn test_track_set_preserves_album_order() {
    let set = PlaylistTrackSet::new(uris(&["spotify:track:2"]));
    let album_tracks = uris(&[
        "spotify:track:4",
        "spotify:track:2",
        "spotify:track:1",
        "spotify:track:3",
    ]);

    assert_eq!(
        set.missing(&album_tracks),
        uris(&["spotify:track:4", "spotify:track:1", "spotify:track:3"])
    );
}

fn release(title: &str, styles: &[&str], have: u32) -> DiscogsRelease {
    DiscogsRelease {
        title: title.to_string(),
        style: styles.iter().map(|s| s.to_string()).collect(),
        community: DiscogsCommunity { have },
        ..Default::default()
    }
}

fn page(results: Vec<DiscogsRelease>, next: Option<&str>) -> DiscogsSearchResponse {
    DiscogsSearchResponse {
        results,
        pagination: DiscogsPagination {
            urls: DiscogsPageUrls {
                next: next.map(|n| n.to_string()),
            },
        },
    }
}

fn sync_params(style: &str, year: &str) -> SyncParams {
    SyncParams {
        playlist_id: "playlist".to_string(),
        style: style.to_string(),
        year: year.to_string(),
        excluded_styles: Vec::new(),
        verbose: false,
    }
}

fn received(rx: &mut UnboundedReceiver<CandidateAlbum>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(album) = rx.try_recv() {
        out.push(album.to_string());
    }
    out
}

// A catalog serving pre-built pages instead of HTTP. The next-page cursor
// is the index of the page it points at.
struct ScriptedCatalog {
    pages: Vec<DiscogsSearchResponse>,
    master_years: HashMap<String, i32>,
}

impl ReleaseSource for ScriptedCatalog {
    async fn search_page(
        &self,
        _style: &str,
        _year: &str,
        cursor: Option<&str>,
    ) -> Res<DiscogsSearchResponse> {
        let index: usize = match cursor {
            None => 0,
            Some(c) => c.parse()?,
        };
        Ok(self.pages[index].clone())
    }

    async fn master_year(&self, master_url: &str) -> Res<i32> {
        self.master_years
            .get(master_url)
            .copied()
            .ok_or_else(|| format!("unknown master {}", master_url).into())
    }
}

#[tokio::test]
async fn test_duplicate_titles_forward_single_candidate() {
    // Discogs lists the same album twice, once under the disambiguated
    // artist name. Both normalize to the same title; only the first becomes
    // a candidate.
    let catalog = ScriptedCatalog {
        pages: vec![page(
            vec![
                release("Wand (2) - Ganglion Reef", &["Psychedelic Rock"], 50),
                release("Wand - Ganglion Reef", &["Psychedelic Rock"], 40),
            ],
            None,
        )],
        master_years: HashMap::new(),
    };
    let filter = StyleFilter::new("Psychedelic Rock", Vec::new());
    let params = sync_params("Psychedelic Rock", "2014");
    let (tx, mut rx) = unbounded_channel();

    let forwarded = discover_candidates(&catalog, &filter, &params, tx)
        .await
        .unwrap();

    assert_eq!(forwarded, 1);
    assert_eq!(received(&mut rx), vec!["Wand - Ganglion Reef"]);
}

#[tokio::test]
async fn test_discovery_exhausts_pagination_and_dedupes_across_pages() {
    let catalog = ScriptedCatalog {
        pages: vec![
            page(
                vec![release("Sleep - The Sciences", &["Doom Metal"], 90)],
                Some("1"),
            ),
            page(
                vec![
                    // Same release re-listed on the second page
                    release("Sleep - The Sciences", &["Doom Metal"], 90),
                    release("Yob - Our Raw Heart", &["Doom Metal"], 70),
                ],
                None,
            ),
        ],
        master_years: HashMap::new(),
    };
    let filter = StyleFilter::new("Doom Metal", Vec::new());
    let params = sync_params("Doom Metal", "2018");
    let (tx, mut rx) = unbounded_channel();

    let forwarded = discover_candidates(&catalog, &filter, &params, tx)
        .await
        .unwrap();

    assert_eq!(forwarded, 2);
    assert_eq!(
        received(&mut rx),
        vec!["Sleep - The Sciences", "Yob - Our Raw Heart"]
    );
}

#[tokio::test]
async fn test_master_year_mismatch_skips_release() {
    let mut reissue = release("Electric Wizard - Dopethrone", &["Doom Metal"], 200);
    reissue.master_url = Some("https://api.discogs.com/masters/18729".to_string());
    let mut current = release("Monolord - Rust", &["Doom Metal"], 60);
    current.master_url = Some("https://api.discogs.com/masters/1209566".to_string());

    let catalog = ScriptedCatalog {
        pages: vec![page(vec![reissue, current], None)],
        master_years: HashMap::from([
            ("https://api.discogs.com/masters/18729".to_string(), 2000),
            ("https://api.discogs.com/masters/1209566".to_string(), 2017),
        ]),
    };
    let filter = StyleFilter::new("Doom Metal", Vec::new());
    let params = sync_params("Doom Metal", "2017");
    let (tx, mut rx) = unbounded_channel();

    let forwarded = discover_candidates(&catalog, &filter, &params, tx)
        .await
        .unwrap();

    assert_eq!(forwarded, 1);
    assert_eq!(received(&mut rx), vec!["Monolord - Rust"]);
}

#[tokio::test]
async fn test_filtered_releases_never_become_candidates() {
    let catalog = ScriptedCatalog {
        pages: vec![page(
            vec![
                release("Obscure - Demo Tape", &["Doom Metal"], 3),
                release("Popular - Hit Record", &["Pop"], 500),
                release("Conan - Existential Void Guardian", &["Doom Metal"], 45),
            ],
            None,
        )],
        master_years: HashMap::new(),
    };
    let filter = StyleFilter::new("Doom Metal", Vec::new());
    let params = sync_params("Doom Metal", "2018");
    let (tx, mut rx) = unbounded_channel();

    let forwarded = discover_candidates(&catalog, &filter, &params, tx)
        .await
        .unwrap();

    assert_eq!(forwarded, 1);
    assert_eq!(received(&mut rx), vec!["Conan - Existential Void Guardian"]);
}

#[test]
fn test_track_set_basics() {
    let set = PlaylistTrackSet::new(uris(&["spotify:track:abc"]));
    assert_eq!(set.len(), 1);
    assert!(!set.is_empty());
    assert!(set.contains("spotify:track:abc"));
    assert!(!set.contains("spotify:track:def"));

    let empty = PlaylistTrackSet::new(Vec::new());
    assert!(empty.is_empty());
}
