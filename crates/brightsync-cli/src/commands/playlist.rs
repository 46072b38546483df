use brightsync_core::db::{Database, LocalStore};
use brightsync_core::listing::NO_PLAYER;
use brightsync_core::{LocalId, Player};

use crate::commands::common::{open_database, CommandContext};
use crate::error::CliError;

pub fn run_playlist_player(
    context: &CommandContext<'_>,
    playlist_id: &str,
    player: &str,
) -> Result<(), CliError> {
    let db = open_database(context.db_path)?;
    let playlist = db
        .playlists()
        .find_one(playlist_id)?
        .ok_or_else(|| CliError::PlaylistNotFound(playlist_id.to_string()))?;

    let player = resolve_player(&db, player)?;
    if let Some(player) = &player {
        if player.api_client != playlist.api_client {
            return Err(CliError::PlayerNotFound(format!(
                "{} does not belong to API client {}",
                player.player_id, playlist.api_client
            )));
        }
    }

    db.playlists()
        .set_player(&playlist.id, player.as_ref().map(|player| &player.id))?;

    println!(
        "{} -> {}",
        playlist.playlist_id,
        describe_choice(&db, context, player.as_ref())?
    );
    Ok(())
}

/// Text reported for the player a playlist now uses
pub fn describe_choice(
    db: &Database,
    context: &CommandContext<'_>,
    player: Option<&Player>,
) -> Result<String, CliError> {
    if let Some(player) = player {
        return Ok(format!("{} ({})", player.name, player.id));
    }
    Ok(match context.describe_default_player(db)? {
        Some(default_player) => format!("API client default player ({default_player})"),
        None => "API client default player".to_string(),
    })
}

/// `_none` clears the choice; anything else is a local id or a Brightcove id
pub fn resolve_player(db: &Database, key: &str) -> Result<Option<Player>, CliError> {
    let key = key.trim();
    if key == NO_PLAYER {
        return Ok(None);
    }

    let players = db.players();
    if let Ok(id) = key.parse::<LocalId>() {
        if let Some(player) = players.get(&id)? {
            return Ok(Some(player));
        }
    }

    players
        .find_one(key)?
        .map(Some)
        .ok_or_else(|| CliError::PlayerNotFound(key.to_string()))
}
