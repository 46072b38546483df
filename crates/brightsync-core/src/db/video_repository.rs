//! Video repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT

use crate::error::{Error, Result};
use crate::models::{
    ApiClientId, Economics, LocalId, RelatedLink, Schedule, Video, VideoImages, VideoStatus,
};
use rusqlite::{params, Connection, OptionalExtension};

use super::{json_column, LocalStore};

const COLUMNS: &str = "id, video_id, api_client, name, description, long_description,
    reference_id, status, tags, custom_fields, duration, economics, complete,
    related_link_title, related_link_url, starts_at, ends_at, created_at, changed_at,
    thumbnail_url, poster_url";

/// `SQLite` implementation of `LocalStore` for videos
pub struct SqliteVideoRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteVideoRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Videos whose text columns match a `LIKE` pattern, newest first.
    ///
    /// `pattern` must already be escaped with `\`. Only videos in one of
    /// `statuses` are returned.
    pub fn search(
        &self,
        pattern: &str,
        statuses: &[VideoStatus],
        limit: usize,
    ) -> Result<Vec<Video>> {
        if statuses.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let statuses = statuses
            .iter()
            .map(|status| status.as_i32().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut stmt = self.conn.prepare(&format!(
            r"SELECT {COLUMNS} FROM videos
             WHERE (name LIKE ?1 ESCAPE '\'
                 OR description LIKE ?1 ESCAPE '\'
                 OR long_description LIKE ?1 ESCAPE '\'
                 OR related_link_title LIKE ?1 ESCAPE '\')
               AND status IN ({statuses})
             ORDER BY created_at DESC, id
             LIMIT ?2"
        ))?;

        let videos = stmt
            .query_map(params![pattern, limit as i64], Self::parse_video)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(videos)
    }

    /// Parse a video from a database row
    fn parse_video(row: &rusqlite::Row<'_>) -> rusqlite::Result<Video> {
        let title: Option<String> = row.get(13)?;
        let url: Option<String> = row.get(14)?;
        let related_link = (title.is_some() || url.is_some()).then_some(RelatedLink { title, url });

        let starts_at: Option<i64> = row.get(15)?;
        let ends_at: Option<i64> = row.get(16)?;
        let schedule =
            (starts_at.is_some() || ends_at.is_some()).then_some(Schedule { starts_at, ends_at });

        let thumbnail: Option<String> = row.get(19)?;
        let poster: Option<String> = row.get(20)?;
        let images =
            (thumbnail.is_some() || poster.is_some()).then_some(VideoImages { thumbnail, poster });

        let economics: String = row.get(11)?;
        let economics = economics.parse::<Economics>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(error))
        })?;

        Ok(Video {
            id: row.get(0)?,
            video_id: row.get(1)?,
            api_client: row.get(2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            long_description: row.get(5)?,
            reference_id: row.get(6)?,
            status: VideoStatus::from_i32(row.get(7)?),
            tags: json_column(row, 8)?,
            custom_fields: json_column(row, 9)?,
            duration: row.get(10)?,
            economics,
            complete: row.get(12)?,
            related_link,
            schedule,
            images,
            created_at: row.get(17)?,
            changed_at: row.get(18)?,
        })
    }
}

impl LocalStore for SqliteVideoRepository<'_> {
    type Record = Video;

    fn find_by_remote_id(&self, remote_id: &str) -> Result<Vec<Video>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM videos WHERE video_id = ? ORDER BY id"))?;

        let videos = stmt
            .query_map(params![remote_id], Self::parse_video)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(videos)
    }

    fn get(&self, id: &LocalId) -> Result<Option<Video>> {
        let video = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM videos WHERE id = ?"),
                params![id],
                Self::parse_video,
            )
            .optional()?;

        Ok(video)
    }

    fn create(&self, video: &Video) -> Result<()> {
        let link = video.related_link.as_ref();
        let schedule = video.schedule.as_ref();
        let images = video.images.as_ref();

        self.conn.execute(
            &format!(
                "INSERT INTO videos ({COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                video.id,
                video.video_id,
                video.api_client,
                video.name,
                video.description,
                video.long_description,
                video.reference_id,
                video.status.as_i32(),
                serde_json::to_value(&video.tags)?,
                serde_json::to_value(&video.custom_fields)?,
                video.duration,
                video.economics.as_str(),
                video.complete,
                link.and_then(|l| l.title.as_deref()),
                link.and_then(|l| l.url.as_deref()),
                schedule.and_then(|s| s.starts_at),
                schedule.and_then(|s| s.ends_at),
                video.created_at,
                video.changed_at,
                images.and_then(|i| i.thumbnail.as_deref()),
                images.and_then(|i| i.poster.as_deref()),
            ],
        )?;

        Ok(())
    }

    fn save(&self, video: &Video) -> Result<()> {
        let link = video.related_link.as_ref();
        let schedule = video.schedule.as_ref();
        let images = video.images.as_ref();

        let rows = self.conn.execute(
            "UPDATE videos SET
                video_id = ?, name = ?, description = ?, long_description = ?,
                reference_id = ?, status = ?, tags = ?, custom_fields = ?,
                duration = ?, economics = ?, complete = ?,
                related_link_title = ?, related_link_url = ?,
                starts_at = ?, ends_at = ?,
                thumbnail_url = ?, poster_url = ?,
                changed_at = ?
             WHERE id = ?",
            params![
                video.video_id,
                video.name,
                video.description,
                video.long_description,
                video.reference_id,
                video.status.as_i32(),
                serde_json::to_value(&video.tags)?,
                serde_json::to_value(&video.custom_fields)?,
                video.duration,
                video.economics.as_str(),
                video.complete,
                link.and_then(|l| l.title.as_deref()),
                link.and_then(|l| l.url.as_deref()),
                schedule.and_then(|s| s.starts_at),
                schedule.and_then(|s| s.ends_at),
                images.and_then(|i| i.thumbnail.as_deref()),
                images.and_then(|i| i.poster.as_deref()),
                video.changed_at,
                video.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("video {}", video.id)));
        }

        Ok(())
    }

    fn list_by_owner(&self, owner: &ApiClientId) -> Result<Vec<Video>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM videos WHERE api_client = ? ORDER BY name, id"
        ))?;

        let videos = stmt
            .query_map(params![owner], Self::parse_video)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(videos)
    }
}
