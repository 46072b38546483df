//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 3;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;
    if version >= CURRENT_VERSION {
        tracing::debug!("Database schema at version {version}");
        return Ok(());
    }

    if version < 1 {
        apply(conn, 1, MIGRATION_V1)?;
    }
    if version < 2 {
        apply(conn, 2, MIGRATION_V2)?;
    }
    if version < 3 {
        apply(conn, 3, MIGRATION_V3)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Apply one migration and record its version atomically
fn apply(conn: &Connection, version: i32, sql: &str) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?)",
        [version],
    )?;
    tx.commit()?;

    tracing::info!("Migrated database to version {version} of {CURRENT_VERSION}");
    Ok(())
}

/// Version 1: players, videos and playlists
const MIGRATION_V1: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY,
        player_id TEXT NOT NULL,
        api_client TEXT NOT NULL,
        name TEXT NOT NULL,
        playlist INTEGER NOT NULL DEFAULT 0,
        version TEXT,
        display_adjusted INTEGER,
        display_height REAL,
        display_width REAL,
        display_units TEXT,
        display_responsive INTEGER,
        created_at INTEGER NOT NULL,
        changed_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_players_player_id ON players(player_id);
    CREATE INDEX IF NOT EXISTS idx_players_api_client ON players(api_client, name);

    CREATE TABLE IF NOT EXISTS videos (
        id TEXT PRIMARY KEY,
        video_id TEXT NOT NULL,
        api_client TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        long_description TEXT,
        reference_id TEXT,
        status INTEGER NOT NULL DEFAULT 0,
        tags TEXT NOT NULL DEFAULT '[]',
        custom_fields TEXT NOT NULL DEFAULT '{}',
        duration INTEGER,
        economics TEXT NOT NULL DEFAULT 'AD_SUPPORTED',
        complete INTEGER NOT NULL DEFAULT 0,
        related_link_title TEXT,
        related_link_url TEXT,
        starts_at INTEGER,
        ends_at INTEGER,
        created_at INTEGER NOT NULL,
        changed_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_videos_video_id ON videos(video_id);
    CREATE INDEX IF NOT EXISTS idx_videos_api_client ON videos(api_client, name);
    CREATE INDEX IF NOT EXISTS idx_videos_created ON videos(created_at DESC);

    CREATE TABLE IF NOT EXISTS playlists (
        id TEXT PRIMARY KEY,
        playlist_id TEXT NOT NULL,
        api_client TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        reference_id TEXT,
        playlist_type TEXT NOT NULL DEFAULT 'EXPLICIT',
        favorite INTEGER NOT NULL DEFAULT 0,
        search TEXT,
        video_ids TEXT NOT NULL DEFAULT '[]',
        player TEXT REFERENCES players(id) ON DELETE SET NULL,
        created_at INTEGER NOT NULL,
        changed_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_playlists_playlist_id ON playlists(playlist_id);
    CREATE INDEX IF NOT EXISTS idx_playlists_api_client ON playlists(api_client, name);
";

/// Version 2: text tracks
const MIGRATION_V2: &str = "
    CREATE TABLE IF NOT EXISTS text_tracks (
        id TEXT PRIMARY KEY,
        text_track_id TEXT NOT NULL,
        api_client TEXT NOT NULL,
        video_id TEXT NOT NULL,
        src TEXT NOT NULL,
        srclang TEXT NOT NULL,
        label TEXT,
        kind TEXT NOT NULL DEFAULT 'captions',
        mime_type TEXT,
        is_default INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        changed_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_text_tracks_text_track_id ON text_tracks(text_track_id);
    CREATE INDEX IF NOT EXISTS idx_text_tracks_video_id ON text_tracks(video_id);
";

/// Version 3: video thumbnail and poster
const MIGRATION_V3: &str = "
    ALTER TABLE videos ADD COLUMN thumbnail_url TEXT;
    ALTER TABLE videos ADD COLUMN poster_url TEXT;
";

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_migrations() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let version = get_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let version = get_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_creates_entity_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        for table in ["players", "videos", "playlists", "text_tracks"] {
            assert!(table_exists(&conn, table), "missing table {table}");
        }
    }

    #[test]
    fn test_upgrades_from_version_1() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn, 1, MIGRATION_V1).unwrap();
        assert!(!table_exists(&conn, "text_tracks"));

        run(&conn).unwrap();
        assert!(table_exists(&conn, "text_tracks"));
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_adds_image_columns() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn, 1, MIGRATION_V1).unwrap();
        apply(&conn, 2, MIGRATION_V2).unwrap();

        run(&conn).unwrap();

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('videos')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert!(columns.iter().any(|column| column == "thumbnail_url"));
        assert!(columns.iter().any(|column| column == "poster_url"));
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }
}
