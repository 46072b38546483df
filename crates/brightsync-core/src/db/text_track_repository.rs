//! Text track repository implementation

use crate::error::{Error, Result};
use crate::models::{ApiClientId, LocalId, TextTrack};
use rusqlite::{params, Connection, OptionalExtension};

use super::LocalStore;

const COLUMNS: &str = "id, text_track_id, api_client, video_id, src, srclang, label,
    kind, mime_type, is_default, created_at, changed_at";

/// `SQLite` implementation of `LocalStore` for text tracks
pub struct SqliteTextTrackRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteTextTrackRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Tracks attached to a video, by Brightcove video id
    pub fn list_by_video(&self, video_id: &str) -> Result<Vec<TextTrack>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM text_tracks WHERE video_id = ? ORDER BY srclang, id"
        ))?;

        let tracks = stmt
            .query_map(params![video_id], Self::parse_track)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tracks)
    }

    /// Parse a text track from a database row
    fn parse_track(row: &rusqlite::Row<'_>) -> rusqlite::Result<TextTrack> {
        Ok(TextTrack {
            id: row.get(0)?,
            text_track_id: row.get(1)?,
            api_client: row.get(2)?,
            video_id: row.get(3)?,
            src: row.get(4)?,
            srclang: row.get(5)?,
            label: row.get(6)?,
            kind: row.get(7)?,
            mime_type: row.get(8)?,
            default: row.get(9)?,
            created_at: row.get(10)?,
            changed_at: row.get(11)?,
        })
    }
}

impl LocalStore for SqliteTextTrackRepository<'_> {
    type Record = TextTrack;

    fn find_by_remote_id(&self, remote_id: &str) -> Result<Vec<TextTrack>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM text_tracks WHERE text_track_id = ? ORDER BY id"
        ))?;

        let tracks = stmt
            .query_map(params![remote_id], Self::parse_track)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tracks)
    }

    fn get(&self, id: &LocalId) -> Result<Option<TextTrack>> {
        let track = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM text_tracks WHERE id = ?"),
                params![id],
                Self::parse_track,
            )
            .optional()?;

        Ok(track)
    }

    fn create(&self, track: &TextTrack) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO text_tracks ({COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                track.id,
                track.text_track_id,
                track.api_client,
                track.video_id,
                track.src,
                track.srclang,
                track.label,
                track.kind,
                track.mime_type,
                track.default,
                track.created_at,
                track.changed_at,
            ],
        )?;

        Ok(())
    }

    fn save(&self, track: &TextTrack) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE text_tracks SET
                text_track_id = ?, video_id = ?, src = ?, srclang = ?, label = ?,
                kind = ?, mime_type = ?, is_default = ?, changed_at = ?
             WHERE id = ?",
            params![
                track.text_track_id,
                track.video_id,
                track.src,
                track.srclang,
                track.label,
                track.kind,
                track.mime_type,
                track.default,
                track.changed_at,
                track.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("text track {}", track.id)));
        }

        Ok(())
    }

    fn list_by_owner(&self, owner: &ApiClientId) -> Result<Vec<TextTrack>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM text_tracks WHERE api_client = ?
             ORDER BY COALESCE(label, srclang), id"
        ))?;

        let tracks = stmt
            .query_map(params![owner], Self::parse_track)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::reconcile::LocalRecord;
    use pretty_assertions::assert_eq;

    fn track(text_track_id: &str, srclang: &str, label: Option<&str>) -> TextTrack {
        TextTrack {
            id: LocalId::new(),
            text_track_id: text_track_id.to_string(),
            api_client: ApiClientId::new("client-1"),
            video_id: "5701234567001".to_string(),
            src: format!("https://example.com/{srclang}.vtt"),
            srclang: srclang.to_string(),
            label: label.map(str::to_string),
            kind: "captions".to_string(),
            mime_type: Some("text/vtt".to_string()),
            default: false,
            created_at: 1_000,
            changed_at: 1_000,
        }
    }

    #[test]
    fn test_create_and_get() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.text_tracks();

        let mut track = track("tt-1", "en", Some("English"));
        track.default = true;
        repo.create(&track).unwrap();

        assert_eq!(repo.get(&track.id).unwrap().unwrap(), track);
    }

    #[test]
    fn test_list_by_owner_orders_by_display_name() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.text_tracks();

        repo.create(&track("tt-1", "fr", Some("French"))).unwrap();
        repo.create(&track("tt-2", "de", None)).unwrap();
        repo.create(&track("tt-3", "en", Some("English"))).unwrap();

        let tracks = repo.list_by_owner(&ApiClientId::new("client-1")).unwrap();
        let names: Vec<_> = tracks.iter().map(LocalRecord::display_name).collect();
        assert_eq!(names, vec!["English", "French", "de"]);
    }

    #[test]
    fn test_list_by_video() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.text_tracks();

        let mut other = track("tt-9", "en", None);
        other.video_id = "other".to_string();
        repo.create(&other).unwrap();
        repo.create(&track("tt-1", "en", None)).unwrap();

        let tracks = repo.list_by_video("5701234567001").unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].text_track_id, "tt-1");
    }
}
