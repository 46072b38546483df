//! Database layer for brightsync

mod connection;
mod migrations;
mod player_repository;
mod playlist_repository;
mod store;
mod text_track_repository;
mod video_repository;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use serde::de::DeserializeOwned;

use crate::models::{ApiClientId, LocalId};

pub use connection::Database;
pub use player_repository::SqlitePlayerRepository;
pub use playlist_repository::SqlitePlaylistRepository;
pub use store::LocalStore;
pub use text_track_repository::SqliteTextTrackRepository;
pub use video_repository::SqliteVideoRepository;

impl ToSql for LocalId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LocalId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for ApiClientId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ApiClientId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self::new)
    }
}

/// Decode a JSON text column
fn json_column<T: DeserializeOwned>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let value: serde_json::Value = row.get(idx)?;
    serde_json::from_value(value)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(error)))
}
