//! Playlist model

use serde::{Deserialize, Serialize};

use super::ids::{ApiClientId, LocalId};
use crate::reconcile::LocalRecord;

/// Brightcove's playlist type for manually curated playlists
pub const EXPLICIT_PLAYLIST: &str = "EXPLICIT";

/// A mirrored Brightcove playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Local identifier
    pub id: LocalId,
    /// Brightcove playlist id
    pub playlist_id: String,
    /// Owning API client
    pub api_client: ApiClientId,
    /// Playlist name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Publisher reference id
    pub reference_id: Option<String>,
    /// Brightcove playlist type (`EXPLICIT`, `ACTIVATED_NEWEST_TO_OLDEST`, ...)
    pub playlist_type: String,
    /// Marked as favorite in Video Cloud Studio
    pub favorite: bool,
    /// Search string of a smart playlist
    pub search: Option<String>,
    /// Brightcove ids of the videos in an explicit playlist
    pub video_ids: Vec<String>,
    /// Player chosen locally for this playlist. Never set by reconciliation.
    pub player: Option<LocalId>,
    /// Creation timestamp on Brightcove (Unix ms)
    pub created_at: i64,
    /// Last local write, mirrors Brightcove's `updated_at` (Unix ms)
    pub changed_at: i64,
}

impl Playlist {
    /// Smart playlists are filled by Brightcove from a search
    #[must_use]
    pub fn is_smart(&self) -> bool {
        self.playlist_type != EXPLICIT_PLAYLIST
    }
}

impl LocalRecord for Playlist {
    const KIND: &'static str = "playlist";

    fn id(&self) -> LocalId {
        self.id
    }

    fn remote_id(&self) -> &str {
        &self.playlist_id
    }

    fn owner(&self) -> &ApiClientId {
        &self.api_client
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn changed_at(&self) -> i64 {
        self.changed_at
    }

    fn set_changed_at(&mut self, changed_at: i64) {
        self.changed_at = changed_at;
    }
}
