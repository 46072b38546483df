use std::path::Path;

use brightsync_core::remote::{RemotePlayer, RemotePlaylist, RemoteVideo, SnapshotFile, VideoTextTrack};
use brightsync_core::sync::{refresh, RetryPolicy};

use crate::cli::RecordKind;
use crate::commands::common::{format_report_lines, open_database, print_lines, CommandContext};
use crate::error::CliError;

pub fn run_refresh(
    context: &CommandContext<'_>,
    kind: RecordKind,
    remote_id: &str,
    input: &Path,
    policy: &RetryPolicy,
) -> Result<(), CliError> {
    let db = open_database(context.db_path)?;
    let reader = SnapshotFile::new(input);
    let owner = context.owner();
    tracing::info!(
        ?kind,
        remote_id,
        snapshot = %reader.path().display(),
        "Refreshing object from snapshot"
    );

    let report = match kind {
        RecordKind::Player => {
            refresh::<_, RemotePlayer, _>(&db.players(), &reader, remote_id, owner, policy)?
        }
        RecordKind::Video => {
            refresh::<_, RemoteVideo, _>(&db.videos(), &reader, remote_id, owner, policy)?
        }
        RecordKind::Playlist => {
            refresh::<_, RemotePlaylist, _>(&db.playlists(), &reader, remote_id, owner, policy)?
        }
        RecordKind::TextTrack => {
            refresh::<_, VideoTextTrack, _>(&db.text_tracks(), &reader, remote_id, owner, policy)?
        }
    };

    print_lines(&format_report_lines(&report));
    Ok(())
}
