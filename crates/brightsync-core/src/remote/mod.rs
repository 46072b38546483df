//! Remote Brightcove objects and the readers that fetch them
//!
//! The Brightcove wire protocol is out of scope: objects arrive already
//! decoded, either from a [`RemoteSnapshot`] held in memory or from a
//! [`SnapshotFile`] re-read on every fetch.

mod player;
mod playlist;
mod snapshot;
mod video;

use thiserror::Error;

pub use player::{
    PlayerBranch, PlayerBranches, PlayerConfiguration, PlayerTemplate, PlayerTemplateConfig,
    RemotePlayer, StudioConfiguration, StudioPlayerSettings,
};
pub use playlist::RemotePlaylist;
pub use snapshot::{RemoteSnapshot, SnapshotFile, SnapshotItem};
pub use video::{
    RemoteImage, RemoteImages, RemoteLink, RemoteSchedule, RemoteTextTrack, RemoteVideo,
    VideoTextTrack,
};

/// Errors raised while fetching a remote object
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Brightcove does not know the object. Not worth retrying.
    #[error("Remote {kind} not found: {remote_id}")]
    NotFound {
        /// Entity kind, e.g. `player`
        kind: &'static str,
        /// Requested Brightcove id
        remote_id: String,
    },

    /// The object could not be fetched. May succeed on retry.
    #[error("Remote transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Transport failures are retryable, missing objects are not
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Fetches remote objects of type `R` by Brightcove id
pub trait RemoteReader<R> {
    /// Fetch one object
    fn fetch_by_id(&self, remote_id: &str) -> Result<R, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(RemoteError::Transport("timeout".to_string()).is_retryable());
        assert!(!RemoteError::NotFound {
            kind: "video",
            remote_id: "1".to_string()
        }
        .is_retryable());
    }
}
