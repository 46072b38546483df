//! Storage seam shared by every mirrored entity kind

use crate::error::{Error, Result};
use crate::models::{ApiClientId, LocalId};
use crate::reconcile::LocalRecord;

/// Persistence of one kind of [`LocalRecord`]
pub trait LocalStore {
    /// Record type held by the store
    type Record: LocalRecord;

    /// Every record mirroring the given Brightcove id.
    ///
    /// More than one result means the store is corrupt.
    fn find_by_remote_id(&self, remote_id: &str) -> Result<Vec<Self::Record>>;

    /// Get a record by local id
    fn get(&self, id: &LocalId) -> Result<Option<Self::Record>>;

    /// Insert a new record
    fn create(&self, record: &Self::Record) -> Result<()>;

    /// Overwrite an existing record. The owner column is never written.
    fn save(&self, record: &Self::Record) -> Result<()>;

    /// Records owned by an API client, ordered by display name then id
    fn list_by_owner(&self, owner: &ApiClientId) -> Result<Vec<Self::Record>>;

    /// The single record mirroring `remote_id`, if any
    fn find_one(&self, remote_id: &str) -> Result<Option<Self::Record>> {
        let mut records = self.find_by_remote_id(remote_id)?;
        if records.len() > 1 {
            return Err(Error::Integrity {
                kind: <Self::Record as LocalRecord>::KIND,
                remote_id: remote_id.to_string(),
                count: records.len(),
            });
        }
        Ok(records.pop())
    }
}
