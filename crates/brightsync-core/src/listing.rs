//! Selection lists of mirrored records

use serde::Serialize;

use crate::db::{LocalStore, SqlitePlayerRepository};
use crate::error::Result;
use crate::models::ApiClientId;
use crate::reconcile::LocalRecord;

/// Brightcove id of the player every account has
pub const DEFAULT_PLAYER: &str = "default";

/// Label of [`DEFAULT_PLAYER`]
pub const DEFAULT_PLAYER_LABEL: &str = "Brightcove Default Player";

/// Key of the "no player chosen" option
pub const NO_PLAYER: &str = "_none";

/// Label of [`NO_PLAYER`]
pub const NO_PLAYER_LABEL: &str = "Use API Client's default player";

/// Which identifier keys the entries of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Local record id
    LocalId,
    /// Brightcove id
    #[default]
    RemoteId,
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Value submitted when the option is chosen
    pub key: String,
    /// Text shown for the option
    pub label: String,
}

impl ListEntry {
    /// Create an entry
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Build a selection list of the records owned by `owner`.
///
/// Without an owner the list holds only `default_entry` in either key mode
/// and the store is not queried. Callers keying by local id must not parse
/// that key. With an owner and remote-id keys `default_entry` comes first;
/// with local-id keys it is left out since it may not match a stored record.
pub fn list<S: LocalStore>(
    store: &S,
    owner: Option<&ApiClientId>,
    mode: KeyMode,
    default_entry: ListEntry,
) -> Result<Vec<ListEntry>> {
    let Some(owner) = owner else {
        return Ok(vec![default_entry]);
    };

    let records = store.list_by_owner(owner)?;
    let mut entries = Vec::with_capacity(records.len() + 1);
    if mode == KeyMode::RemoteId {
        entries.push(default_entry);
    }

    entries.extend(records.iter().map(|record| {
        let key = match mode {
            KeyMode::LocalId => record.id().to_string(),
            KeyMode::RemoteId => record.remote_id().to_string(),
        };
        ListEntry::new(key, record.display_name())
    }));

    Ok(entries)
}

/// Players of an API client, led by the Brightcove default player
pub fn list_players(
    store: &SqlitePlayerRepository<'_>,
    owner: Option<&ApiClientId>,
    mode: KeyMode,
) -> Result<Vec<ListEntry>> {
    list(
        store,
        owner,
        mode,
        ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL),
    )
}

/// Player choices for a playlist, keyed by local id.
///
/// Always starts with [`NO_PLAYER`], which defers to the API client's
/// default player.
pub fn player_options(
    store: &SqlitePlayerRepository<'_>,
    owner: Option<&ApiClientId>,
) -> Result<Vec<ListEntry>> {
    let none = ListEntry::new(NO_PLAYER, NO_PLAYER_LABEL);
    let Some(owner) = owner else {
        return Ok(vec![none]);
    };

    let mut options = vec![none.clone()];
    options.extend(list(store, Some(owner), KeyMode::LocalId, none)?);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{LocalId, Player};
    use pretty_assertions::assert_eq;

    fn seed(db: &Database, player_id: &str, name: &str, owner: &str) -> LocalId {
        let player = Player {
            id: LocalId::new(),
            player_id: player_id.to_string(),
            api_client: ApiClientId::new(owner),
            name: name.to_string(),
            playlist: false,
            version: None,
            display: None,
            created_at: 0,
            changed_at: 0,
        };
        db.players().create(&player).unwrap();
        player.id
    }

    #[test]
    fn no_owner_lists_only_default() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, "p1", "Main", "client-1");

        let entries = list_players(&db.players(), None, KeyMode::RemoteId).unwrap();
        assert_eq!(
            entries,
            vec![ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL)]
        );
    }

    #[test]
    fn no_owner_local_id_mode_keeps_default_key() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, "p1", "Main", "client-1");

        let entries = list_players(&db.players(), None, KeyMode::LocalId).unwrap();
        assert_eq!(
            entries,
            vec![ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL)]
        );
        assert!(entries[0].key.parse::<LocalId>().is_err());
    }

    #[test]
    fn remote_id_mode_leads_with_default() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, "p2", "Zeta", "client-1");
        seed(&db, "p1", "Alpha", "client-1");
        seed(&db, "p3", "Elsewhere", "client-2");

        let owner = ApiClientId::new("client-1");
        let entries = list_players(&db.players(), Some(&owner), KeyMode::RemoteId).unwrap();
        assert_eq!(
            entries,
            vec![
                ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL),
                ListEntry::new("p1", "Alpha"),
                ListEntry::new("p2", "Zeta"),
            ]
        );
    }

    #[test]
    fn local_id_mode_omits_default() {
        let db = Database::open_in_memory().unwrap();
        let id = seed(&db, "p1", "Alpha", "client-1");

        let owner = ApiClientId::new("client-1");
        let entries = list_players(&db.players(), Some(&owner), KeyMode::LocalId).unwrap();
        assert_eq!(entries, vec![ListEntry::new(id.to_string(), "Alpha")]);
    }

    #[test]
    fn player_options_start_with_none() {
        let db = Database::open_in_memory().unwrap();
        let id = seed(&db, "p1", "Alpha", "client-1");

        let owner = ApiClientId::new("client-1");
        assert_eq!(
            player_options(&db.players(), Some(&owner)).unwrap(),
            vec![
                ListEntry::new(NO_PLAYER, NO_PLAYER_LABEL),
                ListEntry::new(id.to_string(), "Alpha"),
            ]
        );
        assert_eq!(
            player_options(&db.players(), None).unwrap(),
            vec![ListEntry::new(NO_PLAYER, NO_PLAYER_LABEL)]
        );
    }
}
