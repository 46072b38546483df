pub mod common;
pub mod completions;
pub mod config;
pub mod listing;
pub mod media;
pub mod playlist;
pub mod refresh;
pub mod search;
pub mod sync;

pub use common::CommandContext;
pub use completions::run_completions;
pub use config::run_config;
pub use listing::{run_player_options, run_players};
pub use media::run_metadata;
pub use playlist::run_playlist_player;
pub use refresh::run_refresh;
pub use search::run_search;
pub use sync::run_sync;
