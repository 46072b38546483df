//! Video model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::{ApiClientId, LocalId};
use crate::error::Error;
use crate::reconcile::LocalRecord;

/// Publication status of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Active on Brightcove
    Published,
    /// Inactive, or any other state Brightcove reports
    #[default]
    NotPublished,
}

impl VideoStatus {
    /// Map a Brightcove `state` value (`ACTIVE`, `INACTIVE`, ...) to a status
    #[must_use]
    pub fn from_state(state: Option<&str>) -> Self {
        match state {
            Some(state) if state.eq_ignore_ascii_case("ACTIVE") => Self::Published,
            _ => Self::NotPublished,
        }
    }

    /// Integer representation stored in the database
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Published => 1,
            Self::NotPublished => 0,
        }
    }

    /// Inverse of [`VideoStatus::as_i32`]; anything non-zero is published
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        if value == 0 {
            Self::NotPublished
        } else {
            Self::Published
        }
    }
}

/// Monetization mode of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Economics {
    /// Ads may be shown
    #[default]
    AdSupported,
    /// No ads
    Free,
}

impl Economics {
    /// Brightcove's wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdSupported => "AD_SUPPORTED",
            Self::Free => "FREE",
        }
    }
}

impl fmt::Display for Economics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Economics {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AD_SUPPORTED" => Ok(Self::AdSupported),
            "FREE" => Ok(Self::Free),
            other => Err(Error::InvalidInput(format!("unknown economics value: {other}"))),
        }
    }
}

/// Related link shown alongside a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    /// Link text
    pub title: Option<String>,
    /// Link target
    pub url: Option<String>,
}

/// Availability window of a video (Unix ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Start of availability
    pub starts_at: Option<i64>,
    /// End of availability
    pub ends_at: Option<i64>,
}

/// Still images of a video, as source URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoImages {
    /// Thumbnail image
    pub thumbnail: Option<String>,
    /// Poster (video still) image
    pub poster: Option<String>,
}

/// A mirrored Brightcove video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Local identifier
    pub id: LocalId,
    /// Brightcove video id
    pub video_id: String,
    /// Owning API client
    pub api_client: ApiClientId,
    /// Video title
    pub name: String,
    /// Short description
    pub description: Option<String>,
    /// Long description
    pub long_description: Option<String>,
    /// Publisher reference id
    pub reference_id: Option<String>,
    /// Publication status
    pub status: VideoStatus,
    /// Tags, in Brightcove order
    pub tags: Vec<String>,
    /// Custom field values keyed by field id
    pub custom_fields: BTreeMap<String, String>,
    /// Duration in milliseconds
    pub duration: Option<i64>,
    /// Monetization mode
    pub economics: Economics,
    /// Whether Brightcove finished processing the video
    pub complete: bool,
    /// Related link, `None` when the video has none
    pub related_link: Option<RelatedLink>,
    /// Availability window, `None` when unscheduled
    pub schedule: Option<Schedule>,
    /// Thumbnail and poster, `None` when the video has neither
    pub images: Option<VideoImages>,
    /// Creation timestamp on Brightcove (Unix ms)
    pub created_at: i64,
    /// Last local write, mirrors Brightcove's `updated_at` (Unix ms)
    pub changed_at: i64,
}

impl Video {
    /// Whether the video is published
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == VideoStatus::Published
    }
}

impl LocalRecord for Video {
    const KIND: &'static str = "video";

    fn id(&self) -> LocalId {
        self.id
    }

    fn remote_id(&self) -> &str {
        &self.video_id
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_state() {
        assert_eq!(VideoStatus::from_state(Some("ACTIVE")), VideoStatus::Published);
        assert_eq!(VideoStatus::from_state(Some("active")), VideoStatus::Published);
        assert_eq!(
            VideoStatus::from_state(Some("INACTIVE")),
            VideoStatus::NotPublished
        );
        assert_eq!(VideoStatus::from_state(None), VideoStatus::NotPublished);
    }

    #[test]
    fn test_status_i32_mapping() {
        assert_eq!(VideoStatus::from_i32(VideoStatus::Published.as_i32()), VideoStatus::Published);
        assert_eq!(VideoStatus::from_i32(0), VideoStatus::NotPublished);
    }

    #[test]
    fn test_economics_parse() {
        assert_eq!("FREE".parse::<Economics>().unwrap(), Economics::Free);
        assert_eq!(
            " ad_supported ".parse::<Economics>().unwrap(),
            Economics::AdSupported
        );
        assert!("PAID".parse::<Economics>().is_err());
    }
}
