//! Remote video and text tracks as returned by the CMS API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    ApiClientId, Economics, LocalId, RelatedLink, Schedule, TextTrack, Video, VideoImages,
    VideoStatus,
};
use crate::reconcile::{FieldChanges, RemoteResource};
use crate::util::normalize_text_option;

/// Brightcove video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVideo {
    /// Video id
    pub id: String,
    /// Title
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Long description
    #[serde(default)]
    pub long_description: Option<String>,
    /// Publisher reference id
    #[serde(default)]
    pub reference_id: Option<String>,
    /// `ACTIVE` or `INACTIVE`
    #[serde(default)]
    pub state: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Custom field values keyed by field id
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: Option<i64>,
    /// Monetization mode
    #[serde(default)]
    pub economics: Option<Economics>,
    /// Processing finished
    #[serde(default)]
    pub complete: bool,
    /// Related link
    #[serde(default)]
    pub link: Option<RemoteLink>,
    /// Availability window
    #[serde(default)]
    pub schedule: Option<RemoteSchedule>,
    /// Thumbnail and poster images
    #[serde(default)]
    pub images: Option<RemoteImages>,
    /// Caption and subtitle tracks
    #[serde(default)]
    pub text_tracks: Vec<RemoteTextTrack>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

/// Related link of a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLink {
    /// Link text
    #[serde(default)]
    pub text: Option<String>,
    /// Link target
    #[serde(default)]
    pub url: Option<String>,
}

/// Availability window of a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSchedule {
    /// Start of availability
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    /// End of availability
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Image renditions of a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImages {
    /// Thumbnail image
    #[serde(default)]
    pub thumbnail: Option<RemoteImage>,
    /// Poster image
    #[serde(default)]
    pub poster: Option<RemoteImage>,
}

/// One image rendition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImage {
    /// Image URL
    #[serde(default)]
    pub src: Option<String>,
}

/// Text track embedded in a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTextTrack {
    /// Track id
    pub id: String,
    /// WebVTT source URL
    pub src: String,
    /// Language code
    pub srclang: String,
    /// Label
    #[serde(default)]
    pub label: Option<String>,
    /// Track kind
    #[serde(default = "default_track_kind")]
    pub kind: String,
    /// MIME type
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Enabled by default
    #[serde(default)]
    pub default: bool,
}

fn default_track_kind() -> String {
    "captions".to_string()
}

/// A text track together with its parent video.
///
/// Text tracks carry no timestamp of their own and take the video's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTextTrack {
    /// Brightcove id of the parent video
    pub video_id: String,
    /// Parent video's last modification
    pub updated_at: DateTime<Utc>,
    /// The track itself
    pub track: RemoteTextTrack,
}

impl RemoteVideo {
    /// Related link, `None` when it has neither text nor URL
    #[must_use]
    pub fn related_link(&self) -> Option<RelatedLink> {
        let link = self.link.as_ref()?;
        let title = normalize_text_option(link.text.clone());
        let url = normalize_text_option(link.url.clone());
        if title.is_none() && url.is_none() {
            return None;
        }
        Some(RelatedLink { title, url })
    }

    /// Availability window, `None` when it has neither bound
    #[must_use]
    pub fn schedule(&self) -> Option<Schedule> {
        let schedule = self.schedule.as_ref()?;
        if schedule.starts_at.is_none() && schedule.ends_at.is_none() {
            return None;
        }
        Some(Schedule {
            starts_at: schedule.starts_at.map(|at| at.timestamp_millis()),
            ends_at: schedule.ends_at.map(|at| at.timestamp_millis()),
        })
    }

    /// Thumbnail and poster URLs, `None` when it has neither
    #[must_use]
    pub fn images(&self) -> Option<VideoImages> {
        let images = self.images.as_ref()?;
        let src = |image: Option<&RemoteImage>| {
            normalize_text_option(image.and_then(|image| image.src.clone()))
        };
        let thumbnail = src(images.thumbnail.as_ref());
        let poster = src(images.poster.as_ref());
        if thumbnail.is_none() && poster.is_none() {
            return None;
        }
        Some(VideoImages { thumbnail, poster })
    }

    /// The video's text tracks paired with the video
    #[must_use]
    pub fn text_track_entries(&self) -> Vec<VideoTextTrack> {
        self.text_tracks
            .iter()
            .map(|track| VideoTextTrack {
                video_id: self.id.clone(),
                updated_at: self.updated_at,
                track: track.clone(),
            })
            .collect()
    }
}

impl RemoteResource for RemoteVideo {
    type Record = Video;

    fn remote_id(&self) -> &str {
        &self.id
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn to_record(&self, owner: ApiClientId) -> Video {
        Video {
            id: LocalId::new(),
            video_id: self.id.clone(),
            api_client: owner,
            name: self.name.clone(),
            description: normalize_text_option(self.description.clone()),
            long_description: normalize_text_option(self.long_description.clone()),
            reference_id: normalize_text_option(self.reference_id.clone()),
            status: VideoStatus::from_state(self.state.as_deref()),
            tags: self.tags.clone(),
            custom_fields: self.custom_fields.clone(),
            duration: self.duration,
            economics: self.economics.unwrap_or_default(),
            complete: self.complete,
            related_link: self.related_link(),
            schedule: self.schedule(),
            images: self.images(),
            created_at: self
                .created_at
                .unwrap_or(self.updated_at)
                .timestamp_millis(),
            changed_at: 0,
        }
    }

    fn diff_into(&self, record: &mut Video, changes: &mut FieldChanges) {
        changes.set("name", &mut record.name, self.name.clone());
        changes.set(
            "description",
            &mut record.description,
            normalize_text_option(self.description.clone()),
        );
        changes.set(
            "long_description",
            &mut record.long_description,
            normalize_text_option(self.long_description.clone()),
        );
        changes.set(
            "reference_id",
            &mut record.reference_id,
            normalize_text_option(self.reference_id.clone()),
        );
        changes.set(
            "status",
            &mut record.status,
            VideoStatus::from_state(self.state.as_deref()),
        );
        changes.set("tags", &mut record.tags, self.tags.clone());
        changes.set(
            "custom_fields",
            &mut record.custom_fields,
            self.custom_fields.clone(),
        );
        changes.set("duration", &mut record.duration, self.duration);
        changes.set(
            "economics",
            &mut record.economics,
            self.economics.unwrap_or_default(),
        );
        changes.set("complete", &mut record.complete, self.complete);
        changes.set_group(
            "related_link",
            &mut record.related_link,
            self.related_link(),
            |changes, current, incoming| {
                changes.set("related_link_title", &mut current.title, incoming.title);
                changes.set("related_link_url", &mut current.url, incoming.url);
            },
        );
        changes.set_group(
            "schedule",
            &mut record.schedule,
            self.schedule(),
            |changes, current, incoming| {
                changes.set("starts_at", &mut current.starts_at, incoming.starts_at);
                changes.set("ends_at", &mut current.ends_at, incoming.ends_at);
            },
        );
        changes.set_group(
            "images",
            &mut record.images,
            self.images(),
            |changes, current, incoming| {
                changes.set("thumbnail", &mut current.thumbnail, incoming.thumbnail);
                changes.set("poster", &mut current.poster, incoming.poster);
            },
        );
    }
}

impl RemoteResource for VideoTextTrack {
    type Record = TextTrack;

    fn remote_id(&self) -> &str {
        &self.track.id
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn to_record(&self, owner: ApiClientId) -> TextTrack {
        TextTrack {
            id: LocalId::new(),
            text_track_id: self.track.id.clone(),
            api_client: owner,
            video_id: self.video_id.clone(),
            src: self.track.src.clone(),
            srclang: self.track.srclang.clone(),
            label: normalize_text_option(self.track.label.clone()),
            kind: self.track.kind.clone(),
            mime_type: normalize_text_option(self.track.mime_type.clone()),
            default: self.track.default,
            created_at: self.updated_at.timestamp_millis(),
            changed_at: 0,
        }
    }

    fn diff_into(&self, record: &mut TextTrack, changes: &mut FieldChanges) {
        changes.set("video_id", &mut record.video_id, self.video_id.clone());
        changes.set("src", &mut record.src, self.track.src.clone());
        changes.set("srclang", &mut record.srclang, self.track.srclang.clone());
        changes.set(
            "label",
            &mut record.label,
            normalize_text_option(self.track.label.clone()),
        );
        changes.set("kind", &mut record.kind, self.track.kind.clone());
        changes.set(
            "mime_type",
            &mut record.mime_type,
            normalize_text_option(self.track.mime_type.clone()),
        );
        changes.set("default", &mut record.default, self.track.default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(json: serde_json::Value) -> RemoteVideo {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn parses_cms_video_payload() {
        let remote = video(serde_json::json!({
            "id": "5701234567001",
            "name": "Launch keynote",
            "description": "  ",
            "state": "ACTIVE",
            "tags": ["keynote", "2024"],
            "custom_fields": { "speaker": "Ada" },
            "duration": 3_600_000,
            "economics": "FREE",
            "complete": true,
            "link": { "text": "Slides", "url": "https://example.com/slides" },
            "schedule": { "starts_at": "2024-05-01T00:00:00Z", "ends_at": null },
            "images": {
                "thumbnail": { "src": "https://cf-images.example.com/thumb.jpg" },
                "poster": { "src": "https://cf-images.example.com/poster.jpg" }
            },
            "text_tracks": [
                { "id": "tt-1", "src": "https://example.com/en.vtt", "srclang": "en", "label": "English", "default": true }
            ],
            "updated_at": "2024-05-02T10:00:00Z"
        }));

        let record = remote.to_record(ApiClientId::new("client-1"));
        assert_eq!(record.description, None);
        assert_eq!(record.status, VideoStatus::Published);
        assert_eq!(record.economics, Economics::Free);
        assert_eq!(record.custom_fields.get("speaker").map(String::as_str), Some("Ada"));
        assert_eq!(
            record.related_link.and_then(|link| link.title).as_deref(),
            Some("Slides")
        );
        assert!(record.schedule.is_some_and(|schedule| schedule.ends_at.is_none()));
        assert_eq!(
            record.images.and_then(|images| images.thumbnail).as_deref(),
            Some("https://cf-images.example.com/thumb.jpg")
        );
        assert_eq!(record.created_at, remote.updated_at.timestamp_millis());
    }

    #[test]
    fn empty_nested_objects_count_as_absent() {
        let remote = video(serde_json::json!({
            "id": "1",
            "name": "Clip",
            "link": { "text": "", "url": null },
            "schedule": {},
            "images": { "thumbnail": { "src": " " }, "poster": {} },
            "updated_at": "2024-05-02T10:00:00Z"
        }));
        assert_eq!(remote.related_link(), None);
        assert_eq!(remote.schedule(), None);
        assert_eq!(remote.images(), None);
    }

    #[test]
    fn text_track_entries_inherit_video_timestamp() {
        let remote = video(serde_json::json!({
            "id": "1",
            "name": "Clip",
            "text_tracks": [
                { "id": "tt-1", "src": "https://example.com/en.vtt", "srclang": "en" },
                { "id": "tt-2", "src": "https://example.com/fr.vtt", "srclang": "fr", "kind": "subtitles" }
            ],
            "updated_at": "2024-05-02T10:00:00Z"
        }));

        let entries = remote.text_track_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.video_id == "1"));
        assert_eq!(entries[0].last_updated(), remote.updated_at);
        assert_eq!(entries[0].track.kind, "captions");
        assert_eq!(entries[1].track.kind, "subtitles");
    }
}
