//! Remote player as returned by the Player Management API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ApiClientId, LocalId, Player, PlayerDisplay, DEFAULT_UNITS};
use crate::reconcile::{FieldChanges, RemoteResource};
use crate::util::normalize_text_option;

/// Brightcove player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePlayer {
    /// Player id
    pub id: String,
    /// Player name
    pub name: String,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Configuration branches
    pub branches: PlayerBranches,
}

/// Player configuration branches. Only the published `master` is mirrored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBranches {
    /// Published branch
    pub master: PlayerBranch,
}

/// One configuration branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBranch {
    /// Last modification of the branch
    pub updated_at: DateTime<Utc>,
    /// Branch configuration
    #[serde(default)]
    pub configuration: PlayerConfiguration,
}

/// Player configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfiguration {
    /// Playlist player
    #[serde(default)]
    pub playlist: bool,
    /// Template information
    #[serde(default)]
    pub player: Option<PlayerTemplateConfig>,
    /// Settings made in Video Cloud Studio
    #[serde(default)]
    pub studio_configuration: Option<StudioConfiguration>,
}

/// Template section of the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTemplateConfig {
    /// Player template
    #[serde(default)]
    pub template: Option<PlayerTemplate>,
}

/// Player template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTemplate {
    /// Template version
    #[serde(default)]
    pub version: Option<String>,
}

/// Studio configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioConfiguration {
    /// Player display settings
    #[serde(default)]
    pub player: Option<StudioPlayerSettings>,
}

/// Player display settings made in Video Cloud Studio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioPlayerSettings {
    /// Adjusted for playlists
    #[serde(default)]
    pub adjusted: Option<bool>,
    /// Height
    #[serde(default)]
    pub height: Option<f64>,
    /// Width
    #[serde(default)]
    pub width: Option<f64>,
    /// Units for height and width
    #[serde(default)]
    pub units: Option<String>,
    /// Responsive sizing
    #[serde(default)]
    pub responsive: Option<bool>,
}

impl StudioPlayerSettings {
    fn is_empty(&self) -> bool {
        self.adjusted.is_none()
            && self.height.is_none()
            && self.width.is_none()
            && self.units.is_none()
            && self.responsive.is_none()
    }
}

impl RemotePlayer {
    /// Template version of the published branch
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.branches
            .master
            .configuration
            .player
            .as_ref()
            .and_then(|player| player.template.as_ref())
            .and_then(|template| normalize_text_option(template.version.clone()))
    }

    /// Display settings of the published branch.
    ///
    /// A studio configuration without any value counts as absent.
    #[must_use]
    pub fn display(&self) -> Option<PlayerDisplay> {
        let settings = self
            .branches
            .master
            .configuration
            .studio_configuration
            .as_ref()?
            .player
            .as_ref()
            .filter(|settings| !settings.is_empty())?;

        Some(PlayerDisplay {
            adjusted: settings.adjusted.unwrap_or(false),
            height: settings.height,
            width: settings.width,
            units: normalize_text_option(settings.units.clone())
                .unwrap_or_else(|| DEFAULT_UNITS.to_string()),
            responsive: settings.responsive.unwrap_or(false),
        })
    }
}

impl RemoteResource for RemotePlayer {
    type Record = Player;

    fn remote_id(&self) -> &str {
        &self.id
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.branches.master.updated_at
    }

    fn to_record(&self, owner: ApiClientId) -> Player {
        Player {
            id: LocalId::new(),
            player_id: self.id.clone(),
            api_client: owner,
            name: self.name.clone(),
            playlist: self.branches.master.configuration.playlist,
            version: self.version(),
            display: self.display(),
            created_at: self
                .created_at
                .unwrap_or(self.branches.master.updated_at)
                .timestamp_millis(),
            changed_at: 0,
        }
    }

    fn diff_into(&self, record: &mut Player, changes: &mut FieldChanges) {
        changes.set("name", &mut record.name, self.name.clone());
        changes.set(
            "playlist",
            &mut record.playlist,
            self.branches.master.configuration.playlist,
        );
        changes.set("version", &mut record.version, self.version());
        changes.set_group(
            "display",
            &mut record.display,
            self.display(),
            |changes, current, incoming| {
                changes.set("adjusted", &mut current.adjusted, incoming.adjusted);
                changes.set("height", &mut current.height, incoming.height);
                changes.set("width", &mut current.width, incoming.width);
                changes.set("units", &mut current.units, incoming.units);
                changes.set("responsive", &mut current.responsive, incoming.responsive);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: serde_json::Value) -> RemotePlayer {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn parses_player_management_payload() {
        let player = parse(serde_json::json!({
            "id": "BkF1aQ8cM",
            "name": "Homepage",
            "created_at": "2018-01-10T12:00:00.000Z",
            "branches": {
                "master": {
                    "updated_at": "2018-02-01T08:30:00.000Z",
                    "configuration": {
                        "playlist": true,
                        "player": { "template": { "version": "6.14.0" } },
                        "studio_configuration": {
                            "player": {
                                "adjusted": true,
                                "height": 360,
                                "width": 640,
                                "units": "px",
                                "responsive": false
                            }
                        }
                    }
                }
            }
        }));

        assert_eq!(player.version().as_deref(), Some("6.14.0"));
        assert_eq!(
            player.display(),
            Some(PlayerDisplay {
                adjusted: true,
                height: Some(360.0),
                width: Some(640.0),
                units: "px".to_string(),
                responsive: false,
            })
        );
        assert_eq!(
            player.last_updated().to_rfc3339(),
            "2018-02-01T08:30:00+00:00"
        );
    }

    #[test]
    fn missing_studio_configuration_has_no_display() {
        let player = parse(serde_json::json!({
            "id": "default",
            "name": "Default",
            "branches": { "master": { "updated_at": "2018-02-01T08:30:00Z" } }
        }));
        assert_eq!(player.display(), None);
        assert_eq!(player.version(), None);
    }

    #[test]
    fn empty_studio_configuration_counts_as_absent() {
        let player = parse(serde_json::json!({
            "id": "default",
            "name": "Default",
            "branches": {
                "master": {
                    "updated_at": "2018-02-01T08:30:00Z",
                    "configuration": { "studio_configuration": { "player": {} } }
                }
            }
        }));
        assert_eq!(player.display(), None);
    }

    #[test]
    fn partial_studio_configuration_fills_defaults() {
        let player = parse(serde_json::json!({
            "id": "default",
            "name": "Default",
            "branches": {
                "master": {
                    "updated_at": "2018-02-01T08:30:00Z",
                    "configuration": { "studio_configuration": { "player": { "responsive": true } } }
                }
            }
        }));
        let display = player.display().unwrap();
        assert!(display.responsive);
        assert!(!display.adjusted);
        assert_eq!(display.units, DEFAULT_UNITS);
    }
}
