//! Playlist repository implementation

use crate::error::{Error, Result};
use crate::models::{ApiClientId, LocalId, Playlist};
use rusqlite::{params, Connection, OptionalExtension};

use super::{json_column, LocalStore};

const COLUMNS: &str = "id, playlist_id, api_client, name, description, reference_id,
    playlist_type, favorite, search, video_ids, player, created_at, changed_at";

/// `SQLite` implementation of `LocalStore` for playlists
pub struct SqlitePlaylistRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePlaylistRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Assign the player used to render a playlist, or clear it with `None`.
    ///
    /// The player must be a stored player record.
    pub fn set_player(&self, id: &LocalId, player: Option<&LocalId>) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE playlists SET player = ? WHERE id = ?",
            params![player, id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("playlist {id}")));
        }

        tracing::debug!(playlist = %id, player = ?player, "Assigned playlist player");
        Ok(())
    }

    /// Parse a playlist from a database row
    fn parse_playlist(row: &rusqlite::Row<'_>) -> rusqlite::Result<Playlist> {
        Ok(Playlist {
            id: row.get(0)?,
            playlist_id: row.get(1)?,
            api_client: row.get(2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            reference_id: row.get(5)?,
            playlist_type: row.get(6)?,
            favorite: row.get(7)?,
            search: row.get(8)?,
            video_ids: json_column(row, 9)?,
            player: row.get(10)?,
            created_at: row.get(11)?,
            changed_at: row.get(12)?,
        })
    }
}

impl LocalStore for SqlitePlaylistRepository<'_> {
    type Record = Playlist;

    fn find_by_remote_id(&self, remote_id: &str) -> Result<Vec<Playlist>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM playlists WHERE playlist_id = ? ORDER BY id"
        ))?;

        let playlists = stmt
            .query_map(params![remote_id], Self::parse_playlist)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(playlists)
    }

    fn get(&self, id: &LocalId) -> Result<Option<Playlist>> {
        let playlist = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM playlists WHERE id = ?"),
                params![id],
                Self::parse_playlist,
            )
            .optional()?;

        Ok(playlist)
    }

    fn create(&self, playlist: &Playlist) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO playlists ({COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                playlist.id,
                playlist.playlist_id,
                playlist.api_client,
                playlist.name,
                playlist.description,
                playlist.reference_id,
                playlist.playlist_type,
                playlist.favorite,
                playlist.search,
                serde_json::to_value(&playlist.video_ids)?,
                playlist.player,
                playlist.created_at,
                playlist.changed_at,
            ],
        )?;

        Ok(())
    }

    /// Writes every mirrored column. `player` is only written by
    /// [`SqlitePlaylistRepository::set_player`].
    fn save(&self, playlist: &Playlist) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE playlists SET
                playlist_id = ?, name = ?, description = ?, reference_id = ?,
                playlist_type = ?, favorite = ?, search = ?, video_ids = ?,
                changed_at = ?
             WHERE id = ?",
            params![
                playlist.playlist_id,
                playlist.name,
                playlist.description,
                playlist.reference_id,
                playlist.playlist_type,
                playlist.favorite,
                playlist.search,
                serde_json::to_value(&playlist.video_ids)?,
                playlist.changed_at,
                playlist.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("playlist {}", playlist.id)));
        }

        Ok(())
    }

    fn list_by_owner(&self, owner: &ApiClientId) -> Result<Vec<Playlist>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM playlists WHERE api_client = ? ORDER BY name, id"
        ))?;

        let playlists = stmt
            .query_map(params![owner], Self::parse_playlist)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(playlists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Player, EXPLICIT_PLAYLIST};
    use pretty_assertions::assert_eq;

    fn playlist(playlist_id: &str, name: &str) -> Playlist {
        Playlist {
            id: LocalId::new(),
            playlist_id: playlist_id.to_string(),
            api_client: ApiClientId::new("client-1"),
            name: name.to_string(),
            description: None,
            reference_id: None,
            playlist_type: EXPLICIT_PLAYLIST.to_string(),
            favorite: false,
            search: None,
            video_ids: vec!["1".to_string(), "2".to_string()],
            player: None,
            created_at: 1_000,
            changed_at: 1_000,
        }
    }

    fn stored_player(db: &Database) -> LocalId {
        let player = Player {
            id: LocalId::new(),
            player_id: "default".to_string(),
            api_client: ApiClientId::new("client-1"),
            name: "Default".to_string(),
            playlist: true,
            version: None,
            display: None,
            created_at: 0,
            changed_at: 0,
        };
        db.players().create(&player).unwrap();
        player.id
    }

    #[test]
    fn test_create_and_get() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.playlists();

        let playlist = playlist("1701", "Curated");
        repo.create(&playlist).unwrap();

        assert_eq!(repo.get(&playlist.id).unwrap().unwrap(), playlist);
    }

    #[test]
    fn test_set_player() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.playlists();
        let player = stored_player(&db);

        let playlist = playlist("1701", "Curated");
        repo.create(&playlist).unwrap();
        repo.set_player(&playlist.id, Some(&player)).unwrap();

        assert_eq!(repo.get(&playlist.id).unwrap().unwrap().player, Some(player));

        repo.set_player(&playlist.id, None).unwrap();
        assert_eq!(repo.get(&playlist.id).unwrap().unwrap().player, None);
    }

    #[test]
    fn test_set_player_rejects_unknown_player() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.playlists();

        let playlist = playlist("1701", "Curated");
        repo.create(&playlist).unwrap();

        let result = repo.set_player(&playlist.id, Some(&LocalId::new()));
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[test]
    fn test_save_keeps_assigned_player() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.playlists();
        let player = stored_player(&db);

        let mut playlist = playlist("1701", "Curated");
        repo.create(&playlist).unwrap();
        repo.set_player(&playlist.id, Some(&player)).unwrap();

        playlist.name = "Renamed".to_string();
        playlist.video_ids.clear();
        repo.save(&playlist).unwrap();

        let fetched = repo.get(&playlist.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Renamed");
        assert!(fetched.video_ids.is_empty());
        assert_eq!(fetched.player, Some(player));
    }

    #[test]
    fn test_set_player_missing_playlist() {
        let db = Database::open_in_memory().unwrap();
        let result = db.playlists().set_player(&LocalId::new(), None);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
