//! Player repository implementation

use crate::error::{Error, Result};
use crate::models::{ApiClientId, LocalId, Player, PlayerDisplay, DEFAULT_UNITS};
use rusqlite::{params, Connection, OptionalExtension};

use super::LocalStore;

const COLUMNS: &str = "id, player_id, api_client, name, playlist, version,
    display_adjusted, display_height, display_width, display_units, display_responsive,
    created_at, changed_at";

/// `SQLite` implementation of `LocalStore` for players
pub struct SqlitePlayerRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePlayerRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a player from a database row
    ///
    /// The display group is present whenever `display_adjusted` is set.
    fn parse_player(row: &rusqlite::Row<'_>) -> rusqlite::Result<Player> {
        let display = match row.get::<_, Option<bool>>(6)? {
            Some(adjusted) => Some(PlayerDisplay {
                adjusted,
                height: row.get(7)?,
                width: row.get(8)?,
                units: row
                    .get::<_, Option<String>>(9)?
                    .unwrap_or_else(|| DEFAULT_UNITS.to_string()),
                responsive: row.get::<_, Option<bool>>(10)?.unwrap_or(false),
            }),
            None => None,
        };

        Ok(Player {
            id: row.get(0)?,
            player_id: row.get(1)?,
            api_client: row.get(2)?,
            name: row.get(3)?,
            playlist: row.get(4)?,
            version: row.get(5)?,
            display,
            created_at: row.get(11)?,
            changed_at: row.get(12)?,
        })
    }
}

impl LocalStore for SqlitePlayerRepository<'_> {
    type Record = Player;

    fn find_by_remote_id(&self, remote_id: &str) -> Result<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM players WHERE player_id = ? ORDER BY id"))?;

        let players = stmt
            .query_map(params![remote_id], Self::parse_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(players)
    }

    fn get(&self, id: &LocalId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM players WHERE id = ?"),
                params![id],
                Self::parse_player,
            )
            .optional()?;

        Ok(player)
    }

    fn create(&self, player: &Player) -> Result<()> {
        let display = player.display.as_ref();

        self.conn.execute(
            &format!(
                "INSERT INTO players ({COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                player.id,
                player.player_id,
                player.api_client,
                player.name,
                player.playlist,
                player.version,
                display.map(|d| d.adjusted),
                display.and_then(|d| d.height),
                display.and_then(|d| d.width),
                display.map(|d| d.units.as_str()),
                display.map(|d| d.responsive),
                player.created_at,
                player.changed_at,
            ],
        )?;

        Ok(())
    }

    fn save(&self, player: &Player) -> Result<()> {
        let display = player.display.as_ref();

        let rows = self.conn.execute(
            "UPDATE players SET
                player_id = ?, name = ?, playlist = ?, version = ?,
                display_adjusted = ?, display_height = ?, display_width = ?,
                display_units = ?, display_responsive = ?,
                changed_at = ?
             WHERE id = ?",
            params![
                player.player_id,
                player.name,
                player.playlist,
                player.version,
                display.map(|d| d.adjusted),
                display.and_then(|d| d.height),
                display.and_then(|d| d.width),
                display.map(|d| d.units.as_str()),
                display.map(|d| d.responsive),
                player.changed_at,
                player.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(format!("player {}", player.id)));
        }

        Ok(())
    }

    fn list_by_owner(&self, owner: &ApiClientId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM players WHERE api_client = ? ORDER BY name, id"
        ))?;

        let players = stmt
            .query_map(params![owner], Self::parse_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(players)
    }
}
