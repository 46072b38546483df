use std::path::{Path, PathBuf};

use brightsync_core::db::{Database, LocalStore};
use brightsync_core::listing::{
    KeyMode, ListEntry, DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL, NO_PLAYER, NO_PLAYER_LABEL,
};
use brightsync_core::sync::{EntityKind, SkippedObject, SyncReport};
use brightsync_core::ApiClientId;
use clap::CommandFactory;
use pretty_assertions::assert_eq;

use crate::cli::{Cli, CompletionShell, RecordKind, SyncKind};
use crate::commands::common::{
    format_entry_lines, format_report_lines, format_timestamp, format_video_lines,
    normalize_search_query, CommandContext,
};
use crate::commands::completions::{render_completions, write_completions};
use crate::commands::config::{apply_config_init, ClientSettings};
use crate::commands::media::{format_metadata_lines, format_text_track_lines};
use crate::commands::listing::{player_entries, player_option_entries};
use crate::commands::playlist::{describe_choice, resolve_player, run_playlist_player};
use crate::commands::refresh::run_refresh;
use crate::commands::sync::run_sync;
use crate::config::CliConfig;
use crate::error::CliError;

const SNAPSHOT: &str = r#"{
    "players": [
        { "id": "default", "name": "Default", "branches": { "master": { "updated_at": "2024-01-01T00:00:00Z" } } },
        { "id": "BkF1aQ8cM", "name": "Homepage", "branches": { "master": { "updated_at": "2024-01-01T00:00:00Z" } } }
    ],
    "videos": [
        {
            "id": "v1",
            "name": "Clip",
            "state": "ACTIVE",
            "updated_at": "2024-01-02T00:00:00Z",
            "images": { "thumbnail": { "src": "https://cf-images.example.com/v1/thumb.jpg" } },
            "text_tracks": [
                { "id": "tt1", "src": "https://cdn.example.com/v1/en.vtt", "srclang": "en", "label": "English", "default": true },
                { "id": "tt2", "src": "https://cdn.example.com/v1/fr.vtt", "srclang": "fr" }
            ]
        }
    ],
    "playlists": [
        { "id": "pl1", "name": "Curated", "video_ids": ["v1"], "updated_at": "2024-01-03T00:00:00Z" }
    ]
}"#;

struct Workspace {
    _dir: tempfile::TempDir,
    db_path: PathBuf,
    snapshot_path: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("brightsync.db");
    let snapshot_path = dir.path().join("snapshot.json");
    std::fs::write(&snapshot_path, SNAPSHOT).unwrap();
    Workspace {
        _dir: dir,
        db_path,
        snapshot_path,
    }
}

fn context<'a>(db_path: &'a Path, client: Option<&str>) -> CommandContext<'a> {
    CommandContext {
        db_path,
        owner: client.map(ApiClientId::new),
        default_player: None,
    }
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn sync_kind_all_covers_every_entity() {
    assert_eq!(SyncKind::All.entity_kinds(), EntityKind::ALL.to_vec());
    assert_eq!(
        SyncKind::TextTracks.entity_kinds(),
        vec![EntityKind::TextTracks]
    );
}

#[test]
fn format_timestamp_renders_utc() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
    assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
}

#[test]
fn normalize_search_query_joins_keywords() {
    let keywords = vec!["launch".to_string(), "key*".to_string()];
    assert_eq!(normalize_search_query(&keywords).unwrap(), "launch key*");
}

#[test]
fn normalize_search_query_rejects_blank() {
    assert!(matches!(
        normalize_search_query(&[" ".to_string()]),
        Err(CliError::EmptySearchQuery)
    ));
    assert!(matches!(
        normalize_search_query(&[]),
        Err(CliError::EmptySearchQuery)
    ));
}

#[test]
fn format_entry_lines_aligns_keys() {
    let entries = vec![
        ListEntry::new("_none", "Use API Client's default player"),
        ListEntry::new("BkF1aQ8cM", "Homepage"),
    ];
    assert_eq!(
        format_entry_lines(&entries),
        vec![
            "_none      Use API Client's default player".to_string(),
            "BkF1aQ8cM  Homepage".to_string(),
        ]
    );
}

#[test]
fn format_video_lines_handles_empty() {
    assert_eq!(format_video_lines(&[]), vec!["No videos found.".to_string()]);
}

#[test]
fn format_report_lines_lists_skipped_objects() {
    let report = SyncReport {
        created: 2,
        updated: 1,
        unchanged: 0,
        skipped: vec![SkippedObject {
            kind: "player",
            remote_id: "default".to_string(),
            reason: "duplicate".to_string(),
        }],
    };
    assert_eq!(
        format_report_lines(&report),
        vec![
            "2 created, 1 updated, 0 unchanged, 1 skipped".to_string(),
            "  skipped player default: duplicate".to_string(),
        ]
    );
}

#[test]
fn config_init_creates_and_activates_client() {
    let mut config = CliConfig::default();
    let name = apply_config_init(
        &mut config,
        Some("acme"),
        ClientSettings {
            default_player: Some(" BkF1aQ8cM ".to_string()),
            max_attempts: Some(5),
            ..ClientSettings::default()
        },
        false,
    )
    .unwrap();

    assert_eq!(name, "acme");
    assert_eq!(config.active_client.as_deref(), Some("acme"));
    assert_eq!(
        config.default_player("acme").as_deref(),
        Some("BkF1aQ8cM")
    );
    assert_eq!(config.retry_policy().max_attempts, 5);
}

#[test]
fn config_init_no_activate_keeps_active_client() {
    let mut config = CliConfig {
        active_client: Some("acme".to_string()),
        ..CliConfig::default()
    };
    apply_config_init(&mut config, Some("other"), ClientSettings::default(), true).unwrap();

    assert_eq!(config.active_client.as_deref(), Some("acme"));
    assert!(config.client("other").is_some());
}

#[test]
fn config_init_rejects_zero_attempts() {
    let mut config = CliConfig::default();
    let result = apply_config_init(
        &mut config,
        Some("acme"),
        ClientSettings {
            max_attempts: Some(0),
            ..ClientSettings::default()
        },
        false,
    );
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("brightsync"));
    assert!(script.contains("player-options"));
}

#[test]
fn completions_write_to_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fish").join("brightsync.fish");

    write_completions(CompletionShell::Fish, &path).unwrap();

    let script = std::fs::read(&path).unwrap();
    assert_eq!(script, render_completions(CompletionShell::Fish));
}

#[test]
fn sync_mirrors_snapshot_into_database() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));

    run_sync(&context, &workspace.snapshot_path, SyncKind::All, true).unwrap();

    let db = Database::open(&workspace.db_path).unwrap();
    let owner = ApiClientId::new("acme");
    assert_eq!(db.players().list_by_owner(&owner).unwrap().len(), 2);
    assert_eq!(db.videos().list_by_owner(&owner).unwrap().len(), 1);
    assert_eq!(db.playlists().list_by_owner(&owner).unwrap().len(), 1);
}

#[test]
fn sync_without_client_fails_on_new_records() {
    let workspace = workspace();
    let context = context(&workspace.db_path, None);

    let result = run_sync(&context, &workspace.snapshot_path, SyncKind::Players, false);
    assert!(matches!(
        result,
        Err(CliError::Core(brightsync_core::Error::MissingOwner { .. }))
    ));
}

#[test]
fn refresh_mirrors_single_object() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));
    let policy = CliConfig::default().retry_policy();

    run_refresh(
        &context,
        RecordKind::Player,
        "BkF1aQ8cM",
        &workspace.snapshot_path,
        &policy,
    )
    .unwrap();

    let db = Database::open(&workspace.db_path).unwrap();
    let player = db.players().find_one("BkF1aQ8cM").unwrap().unwrap();
    assert_eq!(player.name, "Homepage");
    assert!(db.players().find_one("default").unwrap().is_none());
}

#[test]
fn playlist_player_accepts_remote_and_local_ids() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::All, false).unwrap();

    run_playlist_player(&context, "pl1", "BkF1aQ8cM").unwrap();
    let db = Database::open(&workspace.db_path).unwrap();
    let player = db.players().find_one("BkF1aQ8cM").unwrap().unwrap();
    let playlist = db.playlists().find_one("pl1").unwrap().unwrap();
    assert_eq!(playlist.player, Some(player.id));

    let local = resolve_player(&db, &player.id.to_string()).unwrap();
    assert_eq!(local.map(|found| found.id), Some(player.id));

    run_playlist_player(&context, "pl1", "_none").unwrap();
    let playlist = db.playlists().find_one("pl1").unwrap().unwrap();
    assert_eq!(playlist.player, None);
}

#[test]
fn playlist_player_reports_unknown_ids() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::All, false).unwrap();

    assert!(matches!(
        run_playlist_player(&context, "missing", "_none"),
        Err(CliError::PlaylistNotFound(_))
    ));
    assert!(matches!(
        run_playlist_player(&context, "pl1", "nope"),
        Err(CliError::PlayerNotFound(_))
    ));
}

#[test]
fn players_mark_configured_default() {
    let workspace = workspace();
    let mut context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::Players, false).unwrap();
    context.default_player = Some("BkF1aQ8cM".to_string());

    let db = Database::open(&workspace.db_path).unwrap();
    assert_eq!(
        player_entries(&db, &context, KeyMode::RemoteId).unwrap(),
        vec![
            ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL),
            ListEntry::new(DEFAULT_PLAYER, "Default"),
            ListEntry::new("BkF1aQ8cM", "Homepage (default)"),
        ]
    );

    let player = db.players().find_one("BkF1aQ8cM").unwrap().unwrap();
    let entries = player_entries(&db, &context, KeyMode::LocalId).unwrap();
    assert!(entries.contains(&ListEntry::new(player.id.to_string(), "Homepage (default)")));
}

#[test]
fn player_options_name_default_player() {
    let workspace = workspace();
    let mut context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::Players, false).unwrap();
    let db = Database::open(&workspace.db_path).unwrap();

    let entries = player_option_entries(&db, &context).unwrap();
    assert_eq!(entries[0], ListEntry::new(NO_PLAYER, NO_PLAYER_LABEL));

    context.default_player = Some("BkF1aQ8cM".to_string());
    let entries = player_option_entries(&db, &context).unwrap();
    assert_eq!(
        entries[0],
        ListEntry::new(NO_PLAYER, format!("{NO_PLAYER_LABEL} (Homepage)"))
    );
    assert_eq!(entries.len(), 3);

    context.default_player = Some("unmirrored".to_string());
    let entries = player_option_entries(&db, &context).unwrap();
    assert_eq!(
        entries[0],
        ListEntry::new(NO_PLAYER, format!("{NO_PLAYER_LABEL} (unmirrored)"))
    );
}

#[test]
fn default_player_of_other_client_is_not_marked() {
    let workspace = workspace();
    let acme = context(&workspace.db_path, Some("acme"));
    run_sync(&acme, &workspace.snapshot_path, SyncKind::Players, false).unwrap();

    let mut other = context(&workspace.db_path, Some("other"));
    other.default_player = Some("BkF1aQ8cM".to_string());
    let db = Database::open(&workspace.db_path).unwrap();

    assert_eq!(other.resolve_default_player(&db).unwrap(), None);
    assert_eq!(
        player_entries(&db, &other, KeyMode::RemoteId).unwrap(),
        vec![ListEntry::new(DEFAULT_PLAYER, DEFAULT_PLAYER_LABEL)]
    );
}

#[test]
fn clearing_playlist_player_reports_default() {
    let workspace = workspace();
    let mut context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::All, false).unwrap();
    let db = Database::open(&workspace.db_path).unwrap();

    assert_eq!(
        describe_choice(&db, &context, None).unwrap(),
        "API client default player"
    );

    context.default_player = Some("BkF1aQ8cM".to_string());
    run_playlist_player(&context, "pl1", "_none").unwrap();
    assert_eq!(
        describe_choice(&db, &context, None).unwrap(),
        "API client default player (Homepage)"
    );

    let player = db.players().find_one("default").unwrap().unwrap();
    assert_eq!(
        describe_choice(&db, &context, Some(&player)).unwrap(),
        format!("Default ({})", player.id)
    );
}

#[test]
fn metadata_lines_label_every_attribute() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::Videos, false).unwrap();

    let db = Database::open(&workspace.db_path).unwrap();
    let video = db.videos().find_one("v1").unwrap().unwrap();
    let lines = format_metadata_lines(&video);

    assert_eq!(lines.len(), brightsync_core::media::METADATA_ATTRIBUTES.len());
    assert_eq!(lines[0], "Name: Clip");
    assert!(lines.contains(&"API Client: acme".to_string()));
    assert!(lines.contains(&"State: ACTIVE".to_string()));
    assert!(lines.contains(&"Short description: -".to_string()));
    assert!(lines.contains(&"Thumbnail: https://cf-images.example.com/v1/thumb.jpg".to_string()));
    assert!(lines.contains(&"Video Still: -".to_string()));
}

#[test]
fn metadata_lists_text_tracks_of_video() {
    let workspace = workspace();
    let context = context(&workspace.db_path, Some("acme"));
    run_sync(&context, &workspace.snapshot_path, SyncKind::All, false).unwrap();

    let db = Database::open(&workspace.db_path).unwrap();
    let tracks = db.text_tracks().list_by_video("v1").unwrap();
    assert_eq!(
        format_text_track_lines(&tracks),
        vec![
            "Text track: English [captions en] (default) https://cdn.example.com/v1/en.vtt"
                .to_string(),
            "Text track: fr [captions fr] https://cdn.example.com/v1/fr.vtt".to_string(),
        ]
    );
    assert!(format_text_track_lines(&db.text_tracks().list_by_video("v2").unwrap()).is_empty());
}
