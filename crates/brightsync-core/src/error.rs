//! Error types for brightsync-core

use thiserror::Error;

use crate::remote::RemoteError;

/// Result type alias using brightsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in brightsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A record had to be created but no API client was given to own it
    #[error("Cannot create {kind} {remote_id}: an API client is required for new records")]
    MissingOwner {
        /// Entity kind, e.g. `player`
        kind: &'static str,
        /// Brightcove id of the remote object
        remote_id: String,
    },

    /// More than one local record mirrors the same remote object
    #[error("Integrity error: {count} local {kind} records share Brightcove id {remote_id}")]
    Integrity {
        /// Entity kind, e.g. `player`
        kind: &'static str,
        /// Brightcove id shared by the records
        remote_id: String,
        /// Number of records found
        count: usize,
    },

    /// Local store read or write failure
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Remote fetch failure
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
