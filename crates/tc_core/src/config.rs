//! Creator configuration
//!
//! All knobs have defaults matching the stock game database, so an empty
//! YAML/JSON document is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tactics::Formation;

// ========== CreatorConfig ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorConfig {
    /// League every national team is linked to
    pub national_league_id: u32,
    /// Roster cap for national teams (starters + bench)
    pub national_squad_size: usize,
    /// Club bench players linked as substitutes (28); the rest are reserves (29)
    pub club_substitutes: usize,
    /// OVR points deducted per step down a slot's acceptable-position list
    pub position_penalty: i32,
    /// Team holding unattached players; club imports detach players from it
    pub free_agent_team_id: u32,
    /// Player slots on a teamsheet (`playerid0` .. `playerid51`)
    pub teamsheet_slots: usize,
    /// Player ids excluded from national squads on top of the built-in list
    pub extra_blacklist: Vec<u32>,
    /// Nations hidden from scans on top of the built-in base-game list
    pub extra_excluded_nations: Vec<String>,
    /// Additional formations selectable by name
    pub extra_formations: Vec<Formation>,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            national_league_id: 78,
            national_squad_size: 26,
            club_substitutes: 7,
            position_penalty: 3,
            free_agent_team_id: 111_592,
            teamsheet_slots: 52,
            extra_blacklist: Vec::new(),
            extra_excluded_nations: Vec::new(),
            extra_formations: Vec::new(),
        }
    }
}

impl CreatorConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };
        log::debug!("Loaded creator config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: CreatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CreatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.national_squad_size < 12 {
            return Err(ConfigError::InvalidValue {
                field: "national_squad_size",
                reason: format!("must be at least 12, got {}", self.national_squad_size),
            });
        }
        if self.teamsheet_slots < 11 || self.teamsheet_slots > 52 {
            return Err(ConfigError::InvalidValue {
                field: "teamsheet_slots",
                reason: format!("must be 11-52, got {}", self.teamsheet_slots),
            });
        }
        if self.position_penalty < 0 {
            return Err(ConfigError::InvalidValue {
                field: "position_penalty",
                reason: format!("must not be negative, got {}", self.position_penalty),
            });
        }
        for formation in &self.extra_formations {
            formation
                .validate()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "extra_formations",
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}
