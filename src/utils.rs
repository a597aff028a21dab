use std::path::Path;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::Res;

/// Similarity threshold above which two names are considered equivalent.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Computes a normalized Levenshtein similarity score in [0, 1].
///
/// 1.0 means the strings are identical; 0.0 means no overlap at all. The
/// score is symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Decides whether two free-text names refer to the same artist or album
/// despite formatting differences.
pub fn are_similar(a: &str, b: &str) -> bool {
    similarity(a, b) > SIMILARITY_THRESHOLD
}

/// Strips every ` (<digits>)` disambiguation span from a release title.
///
/// Discogs appends these when multiple distinct entities share a name, e.g.
/// `"Wand (2) - Ganglion Reef"`. A span is only removed when the digits are
/// immediately followed by a closing parenthesis; anything else is kept
/// verbatim. The operation is idempotent.
pub fn normalize_title(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    let mut out = String::with_capacity(title.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ' ' && i + 2 < chars.len() && chars[i + 1] == '(' {
            let mut j = i + 2;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j > i + 2 && j < chars.len() && chars[j] == ')' {
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Splits a normalized `"Artist - Album"` title into its two halves.
///
/// Only the first ` - ` separator counts; albums whose names contain the
/// separator themselves stay intact. Returns `None` when no separator is
/// present, which callers treat as a skip.
pub fn split_candidate(title: &str) -> Option<(String, String)> {
    let (artist, album) = title.split_once(" - ")?;
    Some((artist.to_string(), album.to_string()))
}

/// Reads artist names from a file, one per line, skipping blank lines.
pub async fn read_bands_from_file(path: &Path) -> Res<Vec<String>> {
    let content = async_fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Checks a response against the expected status and decodes its JSON body.
///
/// Any other status becomes an error carrying the raw body text, so the
/// upstream service's own diagnostics reach the user unchanged. Malformed
/// bodies on a successful status surface as decode errors.
pub async fn expect_json<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Res<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        return Err(body.into());
    }
    Ok(serde_json::from_str(&body)?)
}
