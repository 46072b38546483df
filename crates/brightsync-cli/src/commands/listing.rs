use brightsync_core::db::Database;
use brightsync_core::listing::{list_players, player_options, KeyMode, ListEntry, NO_PLAYER};

use crate::commands::common::{format_entry_lines, open_database, print_lines, CommandContext};
use crate::error::CliError;

const DEFAULT_MARKER: &str = "(default)";

pub fn run_players(
    context: &CommandContext<'_>,
    by_local_id: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let db = open_database(context.db_path)?;
    let mode = if by_local_id {
        KeyMode::LocalId
    } else {
        KeyMode::RemoteId
    };

    print_entries(&player_entries(&db, context, mode)?, as_json)
}

pub fn run_player_options(context: &CommandContext<'_>, as_json: bool) -> Result<(), CliError> {
    let db = open_database(context.db_path)?;
    print_entries(&player_option_entries(&db, context)?, as_json)
}

/// Players of the context owner with the configured default marked
pub fn player_entries(
    db: &Database,
    context: &CommandContext<'_>,
    mode: KeyMode,
) -> Result<Vec<ListEntry>, CliError> {
    let mut entries = list_players(&db.players(), context.owner(), mode)?;
    if let Some(player) = context.resolve_default_player(db)? {
        let key = match mode {
            KeyMode::LocalId => player.id.to_string(),
            KeyMode::RemoteId => player.player_id,
        };
        if let Some(entry) = entries.iter_mut().find(|entry| entry.key == key) {
            entry.label = format!("{} {DEFAULT_MARKER}", entry.label);
        }
    }
    Ok(entries)
}

/// Playlist player choices, naming the player `_none` defers to
pub fn player_option_entries(
    db: &Database,
    context: &CommandContext<'_>,
) -> Result<Vec<ListEntry>, CliError> {
    let mut entries = player_options(&db.players(), context.owner())?;
    if let Some(default_player) = context.describe_default_player(db)? {
        if let Some(entry) = entries.iter_mut().find(|entry| entry.key == NO_PLAYER) {
            entry.label = format!("{} ({default_player})", entry.label);
        }
    }
    Ok(entries)
}

fn print_entries(entries: &[ListEntry], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        print_lines(&format_entry_lines(entries));
    }
    Ok(())
}
