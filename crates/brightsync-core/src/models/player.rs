//! Player model

use serde::{Deserialize, Serialize};

use super::ids::{ApiClientId, LocalId};
use crate::reconcile::LocalRecord;

/// Units used for player dimensions when Brightcove does not say otherwise
pub const DEFAULT_UNITS: &str = "px";

/// Display settings taken from a player's studio configuration.
///
/// Either the whole group is mirrored or none of it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDisplay {
    /// Whether dimensions are adjusted for playlists
    pub adjusted: bool,
    /// Player height
    pub height: Option<f64>,
    /// Player width
    pub width: Option<f64>,
    /// Units for height and width
    pub units: String,
    /// Whether the player is responsive
    pub responsive: bool,
}

impl Default for PlayerDisplay {
    fn default() -> Self {
        Self {
            adjusted: false,
            height: None,
            width: None,
            units: DEFAULT_UNITS.to_string(),
            responsive: false,
        }
    }
}

/// A mirrored Brightcove player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Local identifier
    pub id: LocalId,
    /// Brightcove player id
    pub player_id: String,
    /// Owning API client
    pub api_client: ApiClientId,
    /// Player name
    pub name: String,
    /// Playlist player (`true`) or single video player (`false`)
    pub playlist: bool,
    /// Player template version
    pub version: Option<String>,
    /// Studio display settings, `None` when the player has none
    pub display: Option<PlayerDisplay>,
    /// Creation timestamp on Brightcove (Unix ms)
    pub created_at: i64,
    /// Last local write, mirrors Brightcove's `updated_at` (Unix ms)
    pub changed_at: i64,
}

impl Player {
    /// Height and width rendered with units, e.g. `640x360px`
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        let display = self.display.as_ref()?;
        match (display.width, display.height) {
            (Some(width), Some(height)) => Some(format!("{width}x{height}{}", display.units)),
            _ => None,
        }
    }
}

impl LocalRecord for Player {
    const KIND: &'static str = "player";

    fn id(&self) -> LocalId {
        self.id
    }

    fn remote_id(&self) -> &str {
        &self.player_id
    }

    fn owner(&self) -> &ApiClientId {
        &self.api_client
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn changed_at(&self) -> i64 {
        self.changed_at
    }

    fn set_changed_at(&mut self, changed_at: i64) {
        self.changed_at = changed_at;
    }
}
