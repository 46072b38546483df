//! Database connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

use super::migrations;
use super::{
    SqlitePlayerRepository, SqlitePlaylistRepository, SqliteTextTrackRepository,
    SqliteVideoRepository,
};

/// Database wrapper around a `SQLite` connection
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Missing parent directories are created. Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let database = Self {
            conn: Connection::open(path)?,
        };
        database.configure()?;
        database.migrate()?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let database = Self {
            conn: Connection::open_in_memory()?,
        };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Configure `SQLite` pragmas
    fn configure(&self) -> Result<()> {
        // In-memory databases report "memory" instead of switching to WAL
        self.conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })
            .ok();
        self.conn.pragma_update(None, "synchronous", "NORMAL").ok();
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Player records
    pub const fn players(&self) -> SqlitePlayerRepository<'_> {
        SqlitePlayerRepository::new(&self.conn)
    }

    /// Video records
    pub const fn videos(&self) -> SqliteVideoRepository<'_> {
        SqliteVideoRepository::new(&self.conn)
    }

    /// Playlist records
    pub const fn playlists(&self) -> SqlitePlaylistRepository<'_> {
        SqlitePlaylistRepository::new(&self.conn)
    }

    /// Text track records
    pub const fn text_tracks(&self) -> SqliteTextTrackRepository<'_> {
        SqliteTextTrackRepository::new(&self.conn)
    }
}
