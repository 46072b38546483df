use std::path::Path;

use brightsync_core::db::{Database, LocalStore};
use brightsync_core::listing::ListEntry;
use brightsync_core::models::{ApiClientId, VideoStatus};
use brightsync_core::search::is_executable;
use brightsync_core::sync::SyncReport;
use brightsync_core::{Player, Video};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct VideoListItem {
    pub id: String,
    pub video_id: String,
    pub name: String,
    pub published: bool,
    pub created_at: i64,
    pub created_at_iso: String,
    pub changed_at: i64,
}

/// Shared context of every database-backed command
pub struct CommandContext<'a> {
    pub db_path: &'a Path,
    pub owner: Option<ApiClientId>,
    /// Brightcove id of the owner's default player
    pub default_player: Option<String>,
}

impl CommandContext<'_> {
    pub fn owner(&self) -> Option<&ApiClientId> {
        self.owner.as_ref()
    }

    /// The owner's default player when it is mirrored under that owner
    pub fn resolve_default_player(&self, db: &Database) -> Result<Option<Player>, CliError> {
        let Some(player_id) = self.default_player.as_deref() else {
            return Ok(None);
        };
        let player = db.players().find_one(player_id)?;
        Ok(player.filter(|player| Some(&player.api_client) == self.owner()))
    }

    /// Name of the default player, or its configured id when not mirrored
    pub fn describe_default_player(&self, db: &Database) -> Result<Option<String>, CliError> {
        Ok(self
            .resolve_default_player(db)?
            .map(|player| player.name)
            .or_else(|| self.default_player.clone()))
    }
}

pub fn open_database(db_path: &Path) -> Result<Database, CliError> {
    tracing::debug!(path = %db_path.display(), "Opening database");
    Ok(Database::open(db_path)?)
}

pub fn normalize_search_query(keywords: &[String]) -> Result<String, CliError> {
    let query = keywords.join(" ");
    if !is_executable(&query) {
        return Err(CliError::EmptySearchQuery);
    }
    Ok(query.trim().to_string())
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |value| value.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn video_to_list_item(video: &Video) -> VideoListItem {
    VideoListItem {
        id: video.id.to_string(),
        video_id: video.video_id.clone(),
        name: video.name.clone(),
        published: video.status == VideoStatus::Published,
        created_at: video.created_at,
        created_at_iso: format_timestamp(video.created_at),
        changed_at: video.changed_at,
    }
}

pub fn format_video_lines(videos: &[Video]) -> Vec<String> {
    if videos.is_empty() {
        return vec!["No videos found.".to_string()];
    }

    videos
        .iter()
        .map(|video| {
            let marker = if video.is_published() { ' ' } else { '*' };
            format!(
                "{}{marker} {}  {}",
                video.video_id,
                format_timestamp(video.created_at),
                video.name
            )
        })
        .collect()
}

pub fn format_entry_lines(entries: &[ListEntry]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|entry| entry.key.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| format!("{:<width$}  {}", entry.key, entry.label))
        .collect()
}

pub fn format_report_lines(report: &SyncReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} created, {} updated, {} unchanged, {} skipped",
        report.created,
        report.updated,
        report.unchanged,
        report.skipped.len()
    )];

    lines.extend(report.skipped.iter().map(|skipped| {
        format!(
            "  skipped {} {}: {}",
            skipped.kind, skipped.remote_id, skipped.reason
        )
    }));

    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
