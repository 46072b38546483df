//! Data models for mirrored Brightcove entities

mod ids;
mod player;
mod playlist;
mod text_track;
mod video;

pub use ids::{ApiClientId, LocalId};
pub use player::{Player, PlayerDisplay, DEFAULT_UNITS};
pub use playlist::{Playlist, EXPLICIT_PLAYLIST};
pub use text_track::TextTrack;
pub use video::{Economics, RelatedLink, Schedule, Video, VideoImages, VideoStatus};
