//! Remote playlist as returned by the CMS API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ApiClientId, LocalId, Playlist, EXPLICIT_PLAYLIST};
use crate::reconcile::{FieldChanges, RemoteResource};
use crate::util::normalize_text_option;

/// Brightcove playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePlaylist {
    /// Playlist id
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Publisher reference id
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Playlist type
    #[serde(rename = "type", default = "default_playlist_type")]
    pub playlist_type: String,
    /// Favorite flag
    #[serde(default)]
    pub favorite: bool,
    /// Smart playlist search
    #[serde(default)]
    pub search: Option<String>,
    /// Video ids of an explicit playlist
    #[serde(default)]
    pub video_ids: Vec<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

fn default_playlist_type() -> String {
    EXPLICIT_PLAYLIST.to_string()
}

impl RemoteResource for RemotePlaylist {
    type Record = Playlist;

    fn remote_id(&self) -> &str {
        &self.id
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn to_record(&self, owner: ApiClientId) -> Playlist {
        Playlist {
            id: LocalId::new(),
            playlist_id: self.id.clone(),
            api_client: owner,
            name: self.name.clone(),
            description: normalize_text_option(self.description.clone()),
            reference_id: normalize_text_option(self.reference_id.clone()),
            playlist_type: self.playlist_type.clone(),
            favorite: self.favorite,
            search: normalize_text_option(self.search.clone()),
            video_ids: self.video_ids.clone(),
            player: None,
            created_at: self
                .created_at
                .unwrap_or(self.updated_at)
                .timestamp_millis(),
            changed_at: 0,
        }
    }

    fn diff_into(&self, record: &mut Playlist, changes: &mut FieldChanges) {
        changes.set("name", &mut record.name, self.name.clone());
        changes.set(
            "description",
            &mut record.description,
            normalize_text_option(self.description.clone()),
        );
        changes.set(
            "reference_id",
            &mut record.reference_id,
            normalize_text_option(self.reference_id.clone()),
        );
        changes.set(
            "playlist_type",
            &mut record.playlist_type,
            self.playlist_type.clone(),
        );
        changes.set("favorite", &mut record.favorite, self.favorite);
        changes.set(
            "search",
            &mut record.search,
            normalize_text_option(self.search.clone()),
        );
        changes.set("video_ids", &mut record.video_ids, self.video_ids.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_smart_playlist() {
        let remote: RemotePlaylist = serde_json::from_value(serde_json::json!({
            "id": "1701",
            "name": "Newest",
            "type": "ACTIVATED_NEWEST_TO_OLDEST",
            "search": "+tags:\"keynote\"",
            "updated_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();

        let record = remote.to_record(ApiClientId::new("client-1"));
        assert!(record.is_smart());
        assert!(record.video_ids.is_empty());
        assert_eq!(record.player, None);
    }

    #[test]
    fn playlist_type_defaults_to_explicit() {
        let remote: RemotePlaylist = serde_json::from_value(serde_json::json!({
            "id": "1702",
            "name": "Curated",
            "video_ids": ["1", "2"],
            "updated_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(remote.playlist_type, EXPLICIT_PLAYLIST);
    }
}
