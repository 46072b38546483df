//! brightsync - Mirror Brightcove objects into a local database
//!
//! Feeds snapshots of Brightcove API responses through the reconciler and
//! queries the mirrored records.

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, DatabaseCommands};
use crate::commands::{
    run_completions, run_config, run_metadata, run_player_options, run_players,
    run_playlist_player, run_refresh, run_search, run_sync, CommandContext,
};
use crate::config::CliConfig;
use crate::error::CliError;
use brightsync_core::ApiClientId;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "brightsync=info"
        .parse::<Directive>()
        .map_err(|error| CliError::Config(format!("Invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        command,
        db_path,
        client,
    } = Cli::parse();

    let command = match command {
        Commands::Config { command } => return run_config(command, client.as_deref()),
        Commands::Completions { shell, output } => {
            return run_completions(shell, output.as_deref());
        }
        Commands::Database(command) => command,
    };

    let config = CliConfig::load().map_err(CliError::Config)?;
    let db_path = config.resolve_db_path(db_path);
    let client = config.resolve_client_name(client.as_deref());
    tracing::debug!(db_path = %db_path.display(), client = ?client, "Resolved CLI context");

    let context = CommandContext {
        db_path: &db_path,
        default_player: client.as_deref().and_then(|name| config.default_player(name)),
        owner: client.map(ApiClientId::new),
    };
    run_database_command(&context, &config, command)
}

fn run_database_command(
    context: &CommandContext<'_>,
    config: &CliConfig,
    command: DatabaseCommands,
) -> Result<(), CliError> {
    match command {
        DatabaseCommands::Sync { input, kind, json } => run_sync(context, &input, kind, json),
        DatabaseCommands::Refresh {
            kind,
            remote_id,
            input,
        } => run_refresh(context, kind, &remote_id, &input, &config.retry_policy()),
        DatabaseCommands::Players { by_local_id, json } => run_players(context, by_local_id, json),
        DatabaseCommands::PlayerOptions { json } => run_player_options(context, json),
        DatabaseCommands::PlaylistPlayer {
            playlist_id,
            player,
        } => run_playlist_player(context, &playlist_id, &player),
        DatabaseCommands::Metadata {
            video_id,
            attribute,
        } => run_metadata(context, &video_id, attribute.as_deref()),
        DatabaseCommands::Search {
            keywords,
            unpublished,
            limit,
            json,
        } => run_search(context, &keywords, unpublished, limit, json),
    }
}
