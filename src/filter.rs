//! Filtering rules applied to raw Discogs search results.
//!
//! A release has to clear every rule below, in order, before it becomes a
//! candidate for Spotify resolution. The first failing rule wins and the
//! rest are never evaluated.

use std::fmt;

use crate::types::DiscogsRelease;

/// Minimum community-ownership count. Anything below this is treated as a
/// bootleg or catalog noise.
pub const MIN_COMMUNITY_HAVE: u32 = 10;

/// Why a release was rejected. Rendered verbatim in verbose skip lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    StyleMismatch,
    ExcludedStyle(String),
    LowOwnership(u32),
    Repressing,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::StyleMismatch => write!(f, "does not match the target style"),
            Rejection::ExcludedStyle(tag) => write!(f, "contains excluded style {}", tag),
            Rejection::LowOwnership(have) => {
                write!(f, "only {} copies in collections", have)
            }
            Rejection::Repressing => write!(f, "is a reissue or remaster"),
        }
    }
}

/// Pure filtering configuration for one run: the target style plus a set of
/// excluded-style substrings.
#[derive(Debug, Clone)]
pub struct StyleFilter {
    style: String,
    excluded: Vec<String>,
}

impl StyleFilter {
    /// Builds a filter for `style`, dropping empty exclusion entries so an
    /// absent `--exclude-styles` flag never matches everything.
    pub fn new(style: &str, excluded: Vec<String>) -> Self {
        StyleFilter {
            style: style.to_string(),
            excluded: excluded.into_iter().filter(|e| !e.is_empty()).collect(),
        }
    }

    /// Applies rules 1-4 (style match, exclusion, ownership, pressing type)
    /// and returns the first rejection, if any. The master-year rule needs a
    /// catalog lookup and lives in the pipeline.
    pub fn evaluate(&self, release: &DiscogsRelease) -> Result<(), Rejection> {
        if !self.matches_style(&release.style) {
            return Err(Rejection::StyleMismatch);
        }
        if let Some(tag) = self.excluded_tag(&release.style) {
            return Err(Rejection::ExcludedStyle(tag));
        }
        if release.community.have < MIN_COMMUNITY_HAVE {
            return Err(Rejection::LowOwnership(release.community.have));
        }
        if is_repressing(&release.format) {
            return Err(Rejection::Repressing);
        }
        Ok(())
    }

    /// Style rule: the suffix of a style tag must equal the target style.
    ///
    /// Only the first one or two tags are inspected, never the full list; a
    /// release tagged with the target style in third position does not
    /// match. Releases without any style tags pass through. Both behaviors
    /// are deliberate and load-bearing for result quality.
    fn matches_style(&self, styles: &[String]) -> bool {
        match styles {
            [] => true,
            [only] => only.ends_with(&self.style),
            [first, second, ..] => {
                first.ends_with(&self.style) || second.ends_with(&self.style)
            }
        }
    }

    /// Exclusion rule: a case-sensitive substring hit in any style tag
    /// rejects the whole release.
    fn excluded_tag(&self, styles: &[String]) -> Option<String> {
        for style in styles {
            for excluded in &self.excluded {
                if style.contains(excluded.as_str()) {
                    return Some(excluded.clone());
                }
            }
        }
        None
    }
}

/// Pressing rule: reissues and remasters are re-listings of older work, not
/// first pressings of the target year.
fn is_repressing(formats: &[String]) -> bool {
    formats.iter().any(|f| f == "Reissue" || f == "Remastered")
}
