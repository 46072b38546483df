use std::path::PathBuf;

use brightsync_core::search::RESULT_LIMIT;
use brightsync_core::sync::EntityKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "brightsync")]
#[command(about = "Mirror Brightcove players, videos and playlists into a local database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// API client owning newly mirrored records
    #[arg(long, global = true, value_name = "NAME")]
    pub client: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Database(DatabaseCommands),
    /// Configure API clients
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Commands that open the local database
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Mirror every object of a snapshot of API responses
    Sync {
        /// Snapshot JSON file
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,
        /// Entity kind to mirror
        #[arg(long, value_enum, default_value_t = SyncKind::All)]
        kind: SyncKind,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-read one object from a snapshot and mirror it
    Refresh {
        /// Entity kind
        #[arg(value_enum)]
        kind: RecordKind,
        /// Brightcove id of the object
        remote_id: String,
        /// Snapshot JSON file
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,
    },
    /// List players of the API client
    Players {
        /// Key entries by local id instead of Brightcove id
        #[arg(long)]
        by_local_id: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List player choices for a playlist
    PlayerOptions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Choose the player a playlist is rendered with
    PlaylistPlayer {
        /// Brightcove id of the playlist
        playlist_id: String,
        /// Player local id or Brightcove id, `_none` to clear
        player: String,
    },
    /// Show media metadata of a mirrored video
    Metadata {
        /// Brightcove id of the video
        video_id: String,
        /// Attribute to show (all when omitted)
        attribute: Option<String>,
    },
    /// Search mirrored videos
    Search {
        /// Keywords, `*` matches any characters
        keywords: Vec<String>,
        /// Include unpublished videos
        #[arg(long)]
        unpublished: bool,
        /// Number of videos to show
        #[arg(short, long, default_value_t = RESULT_LIMIT)]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SyncKind {
    Players,
    Videos,
    Playlists,
    TextTracks,
    All,
}

impl SyncKind {
    pub fn entity_kinds(self) -> Vec<EntityKind> {
        match self {
            Self::Players => vec![EntityKind::Players],
            Self::Videos => vec![EntityKind::Videos],
            Self::Playlists => vec![EntityKind::Playlists],
            Self::TextTracks => vec![EntityKind::TextTracks],
            Self::All => EntityKind::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RecordKind {
    Player,
    Video,
    Playlist,
    TextTrack,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Add or update an API client
    Init {
        /// Name of the API client (defaults to the active one)
        name: Option<String>,
        /// Brightcove id of the client's default player
        #[arg(long, value_name = "ID")]
        default_player: Option<String>,
        /// Fetch attempts per object when refreshing
        #[arg(long, value_name = "N")]
        max_attempts: Option<usize>,
        /// Delay before the first retry in milliseconds
        #[arg(long, value_name = "MS")]
        retry_backoff_ms: Option<u64>,
        /// Keep current active client instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the configuration
    Show,
}
