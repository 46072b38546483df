//! Sync driver feeding remote objects through the reconciler
//!
//! Integrity failures are recorded per object and the run continues. Any
//! other error aborts the run. Transport failures of a [`RemoteReader`] are
//! retried with a blocking linear backoff; objects the remote no longer
//! knows are skipped.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::db::{Database, LocalStore};
use crate::error::{Error, Result};
use crate::models::ApiClientId;
use crate::reconcile::{reconcile, LocalRecord, ReconcileOutcome, RemoteResource};
use crate::remote::{RemoteError, RemoteReader, RemoteSnapshot};

/// Default number of fetch attempts per object
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default delay before the first retry, grown linearly per attempt
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// How often and how patiently to retry transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: usize,
    /// Delay before the first retry in milliseconds
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based)
    #[must_use]
    pub fn delay(&self, attempt: usize) -> Duration {
        let attempt = u64::try_from(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_ms.saturating_mul(attempt))
    }

    /// Fetch `remote_id`, retrying transport failures
    pub fn fetch<R, F>(&self, reader: &F, remote_id: &str) -> std::result::Result<R, RemoteError>
    where
        F: RemoteReader<R>,
    {
        let mut attempt = 0usize;

        loop {
            match reader.fetch_by_id(remote_id) {
                Ok(remote) => return Ok(remote),
                Err(error) => {
                    let should_retry = attempt + 1 < self.max_attempts && error.is_retryable();
                    if !should_retry {
                        return Err(error);
                    }

                    attempt += 1;
                    let delay = self.delay(attempt);
                    tracing::warn!(
                        remote_id,
                        attempt,
                        "Transient fetch failure, retrying in {}ms: {}",
                        delay.as_millis(),
                        error
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }
}

/// An object the driver could not mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedObject {
    /// Entity kind
    pub kind: &'static str,
    /// Brightcove id
    pub remote_id: String,
    /// Why it was skipped
    pub reason: String,
}

/// Tally of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Records created
    pub created: usize,
    /// Records updated
    pub updated: usize,
    /// Records left alone
    pub unchanged: usize,
    /// Objects not mirrored
    pub skipped: Vec<SkippedObject>,
}

impl SyncReport {
    /// Count one reconciliation outcome
    pub fn record(&mut self, outcome: &ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::Created(_) => self.created += 1,
            ReconcileOutcome::Updated { .. } => self.updated += 1,
            ReconcileOutcome::Unchanged(_) => self.unchanged += 1,
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: Self) {
        self.created += other.created;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.skipped.extend(other.skipped);
    }

    /// Objects processed, skipped ones included
    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged + self.skipped.len()
    }

    fn skip(&mut self, kind: &'static str, remote_id: &str, reason: impl fmt::Display) {
        tracing::warn!(kind, remote_id, "Skipped remote object: {reason}");
        self.skipped.push(SkippedObject {
            kind,
            remote_id: remote_id.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Reconcile one object, recording integrity failures instead of failing
fn apply<S, R>(
    report: &mut SyncReport,
    store: &S,
    remote: &R,
    owner: Option<&ApiClientId>,
) -> Result<()>
where
    S: LocalStore,
    R: RemoteResource<Record = S::Record>,
{
    match reconcile(store, remote, owner) {
        Ok(outcome) => report.record(&outcome),
        Err(error @ Error::Integrity { kind, .. }) => report.skip(kind, remote.remote_id(), error),
        Err(error) => return Err(error),
    }
    Ok(())
}

/// Reconcile every object of a batch into `store`
pub fn sync_all<'r, S, R, I>(store: &S, remotes: I, owner: Option<&ApiClientId>) -> Result<SyncReport>
where
    S: LocalStore,
    R: RemoteResource<Record = S::Record> + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let mut report = SyncReport::default();
    for remote in remotes {
        apply(&mut report, store, remote, owner)?;
    }

    tracing::info!(
        kind = <S::Record as LocalRecord>::KIND,
        created = report.created,
        updated = report.updated,
        unchanged = report.unchanged,
        skipped = report.skipped.len(),
        "Synced batch"
    );
    Ok(report)
}

/// Fetch one object through `reader` and reconcile it into `store`.
///
/// Objects the remote reports as missing are skipped. Transport failures
/// that outlast `policy` abort with [`Error::Remote`].
pub fn refresh<S, R, F>(
    store: &S,
    reader: &F,
    remote_id: &str,
    owner: Option<&ApiClientId>,
    policy: &RetryPolicy,
) -> Result<SyncReport>
where
    S: LocalStore,
    R: RemoteResource<Record = S::Record>,
    F: RemoteReader<R>,
{
    let mut report = SyncReport::default();
    match policy.fetch(reader, remote_id) {
        Ok(remote) => apply(&mut report, store, &remote, owner)?,
        Err(error @ RemoteError::NotFound { kind, .. }) => report.skip(kind, remote_id, error),
        Err(error) => return Err(error.into()),
    }
    Ok(report)
}

/// Entity kinds a snapshot sync can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Players
    Players,
    /// Videos
    Videos,
    /// Playlists
    Playlists,
    /// Text tracks of every video
    TextTracks,
}

impl EntityKind {
    /// Every kind, in dependency order
    pub const ALL: [Self; 4] = [Self::Players, Self::Videos, Self::Playlists, Self::TextTracks];

    /// Name used on the command line and in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Videos => "videos",
            Self::Playlists => "playlists",
            Self::TextTracks => "text-tracks",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidInput(format!("unknown entity kind: {s}")))
    }
}

/// Mirror the chosen kinds of a snapshot into `db`
pub fn sync_snapshot(
    db: &Database,
    snapshot: &RemoteSnapshot,
    kinds: &[EntityKind],
    owner: Option<&ApiClientId>,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    for kind in EntityKind::ALL.into_iter().filter(|kind| kinds.contains(kind)) {
        let batch = match kind {
            EntityKind::Players => sync_all(&db.players(), &snapshot.players, owner)?,
            EntityKind::Videos => sync_all(&db.videos(), &snapshot.videos, owner)?,
            EntityKind::Playlists => sync_all(&db.playlists(), &snapshot.playlists, owner)?,
            EntityKind::TextTracks => sync_all(&db.text_tracks(), &snapshot.text_tracks(), owner)?,
        };
        report.merge(batch);
    }
    Ok(report)
}
