//! Text track model

use serde::{Deserialize, Serialize};

use super::ids::{ApiClientId, LocalId};
use crate::reconcile::LocalRecord;

/// A mirrored caption, subtitle or chapter track of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTrack {
    /// Local identifier
    pub id: LocalId,
    /// Brightcove text track id
    pub text_track_id: String,
    /// Owning API client
    pub api_client: ApiClientId,
    /// Brightcove id of the video carrying the track
    pub video_id: String,
    /// WebVTT source URL
    pub src: String,
    /// Language code
    pub srclang: String,
    /// Human-readable label
    pub label: Option<String>,
    /// Track kind (`captions`, `subtitles`, `chapters`, ...)
    pub kind: String,
    /// MIME type of the source
    pub mime_type: Option<String>,
    /// Whether the player enables this track by default
    pub default: bool,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last local write, mirrors the parent video's `updated_at` (Unix ms)
    pub changed_at: i64,
}

impl LocalRecord for TextTrack {
    const KIND: &'static str = "text_track";

    fn id(&self) -> LocalId {
        self.id
    }

    fn remote_id(&self) -> &str {
        &self.text_track_id
    }

    fn owner(&self) -> &ApiClientId {
        &self.api_client
    }

    fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.srclang)
    }

    fn changed_at(&self) -> i64 {
        self.changed_at
    }

    fn set_changed_at(&mut self, changed_at: i64) {
        self.changed_at = changed_at;
    }
}
