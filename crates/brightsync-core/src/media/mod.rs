//! Metadata exposed when a mirrored video backs a media item

use serde_json::{json, Value};

use crate::models::Video;
use crate::util::format_unix_millis;

/// Base URI of the generic media icons
pub const DEFAULT_ICON_BASE_URI: &str = "public://media-icons/generic";

/// Icon used when a video has no thumbnail
pub const NO_THUMBNAIL_ICON: &str = "no-thumbnail.png";

/// Metadata attribute names and their labels, in display order
pub const METADATA_ATTRIBUTES: &[(&str, &str)] = &[
    ("name", "Name"),
    ("api_client", "API Client"),
    ("video_id", "Video ID"),
    ("duration", "Video Duration"),
    ("description", "Short description"),
    ("long_description", "Long description"),
    ("poster", "Video Still"),
    ("thumbnail", "Thumbnail"),
    ("complete", "Complete"),
    ("reference_id", "Reference ID"),
    ("state", "State"),
    ("tags", "Tags"),
    ("custom_fields", "Custom fields"),
    ("schedule", "Schedule"),
    ("starts_at", "Starts at"),
    ("ends_at", "Ends at"),
    ("picture_thumbnail", "Thumbnail picture"),
    ("picture_poster", "Picture poster"),
    ("economics", "Economics"),
    ("related_link", "Related link"),
];

/// Label of a metadata attribute
#[must_use]
pub fn attribute_label(name: &str) -> Option<&'static str> {
    METADATA_ATTRIBUTES
        .iter()
        .find(|(attribute, _)| *attribute == name)
        .map(|(_, label)| *label)
}

/// Thumbnail of `video`, or the generic icon under `icon_base_uri`
#[must_use]
pub fn thumbnail_uri(video: &Video, icon_base_uri: &str) -> String {
    video
        .images
        .as_ref()
        .and_then(|images| images.thumbnail.clone())
        .unwrap_or_else(|| format!("{}/{NO_THUMBNAIL_ICON}", icon_base_uri.trim_end_matches('/')))
}

/// Value of a metadata attribute of `video`.
///
/// `None` for unknown attributes, [`Value::Null`] for known ones the video
/// has no value for. Timestamps render as RFC 3339. `thumbnail_uri` is
/// always set, falling back to the generic icon.
#[must_use]
pub fn metadata(video: &Video, attribute: &str) -> Option<Value> {
    let schedule = video.schedule.as_ref();
    let images = video.images.as_ref();
    let value = match attribute {
        "thumbnail_uri" => json!(thumbnail_uri(video, DEFAULT_ICON_BASE_URI)),
        "thumbnail" | "picture_thumbnail" => json!(images.and_then(|i| i.thumbnail.as_deref())),
        "poster" | "picture_poster" => json!(images.and_then(|i| i.poster.as_deref())),
        "name" => json!(video.name),
        "api_client" => json!(video.api_client),
        "video_id" => json!(video.video_id),
        "duration" => json!(video.duration),
        "description" => json!(video.description),
        "long_description" => json!(video.long_description),
        "complete" => json!(video.complete),
        "reference_id" => json!(video.reference_id),
        "state" => json!(if video.is_published() { "ACTIVE" } else { "INACTIVE" }),
        "tags" => json!(video.tags),
        "custom_fields" => json!(video.custom_fields),
        "schedule" => schedule.map_or(Value::Null, |schedule| {
            json!({
                "starts_at": schedule.starts_at.map(format_unix_millis),
                "ends_at": schedule.ends_at.map(format_unix_millis),
            })
        }),
        "starts_at" => json!(schedule.and_then(|s| s.starts_at).map(format_unix_millis)),
        "ends_at" => json!(schedule.and_then(|s| s.ends_at).map(format_unix_millis)),
        "economics" => json!(video.economics.as_str()),
        "related_link" => json!(video.related_link),
        _ => return None,
    };
    Some(value)
}
