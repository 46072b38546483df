//! JSON snapshots of remote API responses

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{RemoteError, RemotePlayer, RemotePlaylist, RemoteReader, RemoteVideo, VideoTextTrack};
use crate::error::Result;
use crate::reconcile::{LocalRecord, RemoteResource};

/// Remote objects captured from the Brightcove APIs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    /// Players
    #[serde(default)]
    pub players: Vec<RemotePlayer>,
    /// Videos, with their text tracks
    #[serde(default)]
    pub videos: Vec<RemoteVideo>,
    /// Playlists
    #[serde(default)]
    pub playlists: Vec<RemotePlaylist>,
}

impl RemoteSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a snapshot file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Text tracks of every video
    #[must_use]
    pub fn text_tracks(&self) -> Vec<VideoTextTrack> {
        self.videos
            .iter()
            .flat_map(RemoteVideo::text_track_entries)
            .collect()
    }
}

/// Remote resource kinds that can be pulled out of a snapshot
pub trait SnapshotItem: RemoteResource + Sized {
    /// Every object of this kind in the snapshot
    fn all(snapshot: &RemoteSnapshot) -> Vec<Self>;

    /// The object with the given Brightcove id
    fn find(snapshot: &RemoteSnapshot, remote_id: &str) -> Option<Self> {
        Self::all(snapshot)
            .into_iter()
            .find(|item| item.remote_id() == remote_id)
    }
}

impl SnapshotItem for RemotePlayer {
    fn all(snapshot: &RemoteSnapshot) -> Vec<Self> {
        snapshot.players.clone()
    }

    fn find(snapshot: &RemoteSnapshot, remote_id: &str) -> Option<Self> {
        snapshot.players.iter().find(|p| p.id == remote_id).cloned()
    }
}

impl SnapshotItem for RemoteVideo {
    fn all(snapshot: &RemoteSnapshot) -> Vec<Self> {
        snapshot.videos.clone()
    }

    fn find(snapshot: &RemoteSnapshot, remote_id: &str) -> Option<Self> {
        snapshot.videos.iter().find(|v| v.id == remote_id).cloned()
    }
}

impl SnapshotItem for RemotePlaylist {
    fn all(snapshot: &RemoteSnapshot) -> Vec<Self> {
        snapshot.playlists.clone()
    }

    fn find(snapshot: &RemoteSnapshot, remote_id: &str) -> Option<Self> {
        snapshot.playlists.iter().find(|p| p.id == remote_id).cloned()
    }
}

impl SnapshotItem for VideoTextTrack {
    fn all(snapshot: &RemoteSnapshot) -> Vec<Self> {
        snapshot.text_tracks()
    }
}

impl<R: SnapshotItem> RemoteReader<R> for RemoteSnapshot {
    fn fetch_by_id(&self, remote_id: &str) -> std::result::Result<R, RemoteError> {
        R::find(self, remote_id).ok_or_else(|| RemoteError::NotFound {
            kind: <R::Record as LocalRecord>::KIND,
            remote_id: remote_id.to_string(),
        })
    }
}

/// Snapshot file re-read on every fetch.
///
/// Read and parse failures surface as transport errors since the file may
/// be mid-write by whatever exports it.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Reader for the snapshot at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> std::result::Result<RemoteSnapshot, RemoteError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|error| {
            RemoteError::Transport(format!("reading {}: {error}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            RemoteError::Transport(format!("parsing {}: {error}", self.path.display()))
        })
    }
}

impl<R: SnapshotItem> RemoteReader<R> for SnapshotFile {
    fn fetch_by_id(&self, remote_id: &str) -> std::result::Result<R, RemoteError> {
        self.load()?.fetch_by_id(remote_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "players": [
            { "id": "default", "name": "Default", "branches": { "master": { "updated_at": "2024-01-01T00:00:00Z" } } }
        ],
        "videos": [
            {
                "id": "v1",
                "name": "Clip",
                "updated_at": "2024-01-02T00:00:00Z",
                "text_tracks": [ { "id": "tt-1", "src": "https://example.com/en.vtt", "srclang": "en" } ]
            }
        ]
    }"#;

    #[test]
    fn fetch_by_id_finds_each_kind() {
        let snapshot = RemoteSnapshot::from_json(SNAPSHOT).unwrap();

        let player: RemotePlayer = snapshot.fetch_by_id("default").unwrap();
        assert_eq!(player.name, "Default");

        let video: RemoteVideo = snapshot.fetch_by_id("v1").unwrap();
        assert_eq!(video.text_tracks.len(), 1);

        let track: VideoTextTrack = snapshot.fetch_by_id("tt-1").unwrap();
        assert_eq!(track.video_id, "v1");
        assert!(snapshot.playlists.is_empty());
    }

    #[test]
    fn fetch_by_id_reports_not_found() {
        let snapshot = RemoteSnapshot::from_json(SNAPSHOT).unwrap();
        let result: std::result::Result<RemotePlaylist, _> = snapshot.fetch_by_id("nope");
        assert!(matches!(
            result,
            Err(RemoteError::NotFound { kind: "playlist", .. })
        ));
    }

    #[test]
    fn snapshot_file_maps_missing_file_to_transport() {
        let dir = tempfile::tempdir().unwrap();
        let reader = SnapshotFile::new(dir.path().join("missing.json"));
        let result: std::result::Result<RemotePlayer, _> = reader.fetch_by_id("default");
        assert!(result.is_err_and(|error| error.is_retryable()));
    }

    #[test]
    fn snapshot_file_reads_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let reader = SnapshotFile::new(&path);
        let video: RemoteVideo = reader.fetch_by_id("v1").unwrap();
        assert_eq!(video.name, "Clip");
    }
}
