//! Keyword search over mirrored videos
//!
//! Keywords match partial words in a video's name, descriptions and related
//! link title. `*` inside a keyword matches any run of characters, so
//! `s*m` finds "strawman", "seem" and "blossoming".

use regex::Regex;
use std::sync::OnceLock;

use crate::db::SqliteVideoRepository;
use crate::error::Result;
use crate::models::{Video, VideoStatus};

/// Maximum number of videos a search returns
pub const RESULT_LIMIT: usize = 15;

/// Which publication statuses a search may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    /// Include published videos
    pub published: bool,
    /// Include unpublished videos
    pub unpublished: bool,
}

impl StatusFilter {
    /// Published videos only
    pub const PUBLISHED: Self = Self {
        published: true,
        unpublished: false,
    };

    /// Every video
    pub const ALL: Self = Self {
        published: true,
        unpublished: true,
    };

    /// Statuses allowed by the filter
    #[must_use]
    pub fn statuses(self) -> Vec<VideoStatus> {
        let mut statuses = Vec::with_capacity(2);
        if self.published {
            statuses.push(VideoStatus::Published);
        }
        if self.unpublished {
            statuses.push(VideoStatus::NotPublished);
        }
        statuses
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::PUBLISHED
    }
}

/// Whether the keywords are worth running a query for
#[must_use]
pub fn is_executable(keywords: &str) -> bool {
    !keywords.trim().is_empty()
}

/// Turn keywords into a `LIKE` pattern escaped with `\`.
///
/// `%`, `_` and `\` match literally; runs of `*` become `%`.
#[must_use]
pub fn like_pattern(keywords: &str) -> String {
    static WILDCARDS: OnceLock<Regex> = OnceLock::new();
    let wildcards = WILDCARDS.get_or_init(|| Regex::new(r"\*+").expect("Invalid regex"));

    let mut escaped = String::with_capacity(keywords.len() + 2);
    for ch in keywords.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    format!("%{}%", wildcards.replace_all(&escaped, "%"))
}

/// Videos matching `keywords`, newest first.
///
/// Returns nothing for blank keywords or a filter that allows no status.
pub fn search_videos(
    videos: &SqliteVideoRepository<'_>,
    keywords: &str,
    filter: StatusFilter,
    limit: usize,
) -> Result<Vec<Video>> {
    if !is_executable(keywords) {
        return Ok(Vec::new());
    }

    let pattern = like_pattern(keywords);
    let statuses = filter.statuses();
    tracing::debug!(%pattern, ?statuses, limit, "Searching videos");

    videos.search(&pattern, &statuses, limit.min(RESULT_LIMIT))
}
