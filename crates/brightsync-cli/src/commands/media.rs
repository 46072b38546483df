use brightsync_core::db::LocalStore;
use brightsync_core::media::{attribute_label, metadata, METADATA_ATTRIBUTES};
use brightsync_core::{TextTrack, Video};
use serde_json::Value;

use crate::commands::common::{open_database, print_lines, CommandContext};
use crate::error::CliError;

pub fn run_metadata(
    context: &CommandContext<'_>,
    video_id: &str,
    attribute: Option<&str>,
) -> Result<(), CliError> {
    let db = open_database(context.db_path)?;
    let video = db
        .videos()
        .find_one(video_id)?
        .ok_or_else(|| CliError::VideoNotFound(video_id.to_string()))?;

    if let Some(attribute) = attribute {
        let value = metadata(&video, attribute)
            .ok_or_else(|| CliError::UnknownAttribute(attribute.to_string()))?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_lines(&format_metadata_lines(&video));
    let tracks = db.text_tracks().list_by_video(&video.video_id)?;
    print_lines(&format_text_track_lines(&tracks));
    Ok(())
}

/// One line per text track, empty when the video has none
pub fn format_text_track_lines(tracks: &[TextTrack]) -> Vec<String> {
    tracks
        .iter()
        .map(|track| {
            let label = track.label.as_deref().unwrap_or(&track.srclang);
            let marker = if track.default { " (default)" } else { "" };
            format!(
                "Text track: {label} [{} {}]{marker} {}",
                track.kind, track.srclang, track.src
            )
        })
        .collect()
}

pub fn format_metadata_lines(video: &Video) -> Vec<String> {
    METADATA_ATTRIBUTES
        .iter()
        .filter_map(|(attribute, _)| {
            let value = metadata(video, attribute)?;
            let label = attribute_label(attribute)?;
            let rendered = match value {
                Value::Null => "-".to_string(),
                Value::String(text) => text,
                other => other.to_string(),
            };
            Some(format!("{label}: {rendered}"))
        })
        .collect()
}
