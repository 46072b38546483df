//! Remote-to-local reconciliation
//!
//! [`reconcile`] brings exactly one local record into agreement with
//! exactly one remote object. It never performs network I/O: the caller
//! hands in a fully fetched remote object and a [`LocalStore`] to read from
//! and write to. Each call issues at most one read and one write.

mod changes;

use chrono::{DateTime, Utc};

use crate::db::LocalStore;
use crate::error::{Error, Result};
use crate::models::{ApiClientId, LocalId};

pub use changes::FieldChanges;

/// A locally persisted mirror of a remote object
pub trait LocalRecord {
    /// Entity kind used in logs and errors
    const KIND: &'static str;

    /// Local identifier
    fn id(&self) -> LocalId;

    /// Brightcove id, the join key to the remote object
    fn remote_id(&self) -> &str;

    /// API client the record belongs to
    fn owner(&self) -> &ApiClientId;

    /// Name shown in selection lists
    fn display_name(&self) -> &str;

    /// Last local write (Unix ms)
    fn changed_at(&self) -> i64;

    /// Record a local write
    fn set_changed_at(&mut self, changed_at: i64);
}

/// A remote object that can be mirrored into a [`LocalRecord`]
pub trait RemoteResource {
    /// Local record type mirroring this resource
    type Record: LocalRecord;

    /// Brightcove id
    fn remote_id(&self) -> &str;

    /// When Brightcove last modified the object
    fn last_updated(&self) -> DateTime<Utc>;

    /// Build a brand-new record owned by `owner`.
    ///
    /// `changed_at` is overwritten by the reconciler.
    fn to_record(&self, owner: ApiClientId) -> Self::Record;

    /// Copy every differing attribute into `record`, noting each in `changes`.
    ///
    /// Must not touch the record's id, owner or `changed_at`.
    fn diff_into(&self, record: &mut Self::Record, changes: &mut FieldChanges);
}

/// What [`reconcile`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new record was created
    Created(LocalId),
    /// An existing record was rewritten
    Updated {
        /// Record that changed
        id: LocalId,
        /// Names of the attributes that differed
        fields: Vec<&'static str>,
    },
    /// Nothing was written
    Unchanged(LocalId),
}

impl ReconcileOutcome {
    /// Identifier of the record the outcome refers to
    #[must_use]
    pub const fn id(&self) -> LocalId {
        match self {
            Self::Created(id) | Self::Unchanged(id) | Self::Updated { id, .. } => *id,
        }
    }
}

/// Create, update or skip the local record mirroring `remote`.
///
/// `owner` is only consulted when no record exists yet; it is required in
/// that case. Records whose `changed_at` is not older than the remote
/// `last_updated` are left alone even if their values differ.
pub fn reconcile<S, R>(store: &S, remote: &R, owner: Option<&ApiClientId>) -> Result<ReconcileOutcome>
where
    S: LocalStore,
    R: RemoteResource<Record = S::Record>,
{
    let kind = <R::Record as LocalRecord>::KIND;
    let remote_id = remote.remote_id();
    let last_updated = remote.last_updated().timestamp_millis();

    let Some(mut record) = store.find_one(remote_id)? else {
        let owner = owner.ok_or_else(|| Error::MissingOwner {
            kind,
            remote_id: remote_id.to_string(),
        })?;

        let mut record = remote.to_record(owner.clone());
        record.set_changed_at(last_updated);
        store.create(&record)?;

        tracing::info!(kind, remote_id, owner = %owner, "Created local record");
        return Ok(ReconcileOutcome::Created(record.id()));
    };

    if record.changed_at() >= last_updated {
        tracing::debug!(
            kind,
            remote_id,
            changed_at = record.changed_at(),
            last_updated,
            "Remote is not newer, skipping"
        );
        return Ok(ReconcileOutcome::Unchanged(record.id()));
    }

    let mut changes = FieldChanges::default();
    remote.diff_into(&mut record, &mut changes);

    if changes.is_empty() {
        tracing::debug!(kind, remote_id, "Remote is newer but no field differs");
        return Ok(ReconcileOutcome::Unchanged(record.id()));
    }

    record.set_changed_at(last_updated);
    store.save(&record)?;

    tracing::info!(
        kind,
        remote_id,
        fields = ?changes.fields(),
        "Updated local record"
    );
    Ok(ReconcileOutcome::Updated {
        id: record.id(),
        fields: changes.into_fields(),
    })
}
