//! brightsync-core - Core library for brightsync
//!
//! Mirrors Brightcove players, videos, playlists and text tracks into a
//! local SQLite store. The heart of the crate is [`reconcile::reconcile`],
//! which brings one local record into agreement with one remote object.

pub mod db;
pub mod error;
pub mod listing;
pub mod media;
pub mod models;
pub mod reconcile;
pub mod remote;
pub mod search;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{ApiClientId, LocalId, Player, Playlist, TextTrack, Video};
pub use reconcile::{reconcile, ReconcileOutcome};
