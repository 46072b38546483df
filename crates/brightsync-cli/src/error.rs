use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] brightsync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Search keywords cannot be empty")]
    EmptySearchQuery,
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error("Video not found: {0}")]
    VideoNotFound(String),
    #[error("Unknown metadata attribute: {0}")]
    UnknownAttribute(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No API client selected. Run `brightsync config init <name>`, pass --client, or set BRIGHTSYNC_CLIENT."
    )]
    NoClient,
}
