//! Scenario files for the simulation

use glam::Vec3;
use leash_core::config::{load_settings, ConfigError, Settings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario loading error
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Failed to read scenario file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Scenario validation error: {0}")]
    ValidationError(String),
}

/// A complete simulation setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    pub heli: HeliSpec,
    pub players: Vec<PlayerSpec>,
    /// Inline leash settings
    #[serde(default)]
    pub settings: Settings,
    /// Settings file to use instead of the inline table
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

fn default_seed() -> u64 {
    42
}
fn default_ticks() -> u32 {
    60
}

/// The patrol helicopter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeliSpec {
    pub position: Vec3,
    pub health: f32,
    /// Distance covered per tick while flying to a navigation target
    pub speed: f32,
    /// Damage range of a single hit
    pub damage_min: f32,
    pub damage_max: f32,
}

/// A player shooting at the helicopter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub position: Vec3,
    /// Movement per tick
    #[serde(default)]
    pub velocity: Vec3,
    /// Tick at which the player leaves the server
    #[serde(default)]
    pub disconnect_at: Option<u32>,
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn parse(content: &str) -> Result<Self, SimError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The built-in scenario
    pub fn builtin() -> Result<Self, SimError> {
        Self::parse(include_str!("../scenarios/default.toml"))
    }

    /// Settings from `settings_path` if given, else the inline table
    pub fn resolve_settings(&self) -> Result<Settings, SimError> {
        match &self.settings_path {
            Some(path) => Ok(load_settings(path)?),
            None => {
                self.settings.validate()?;
                Ok(self.settings.clone())
            }
        }
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.players.is_empty() {
            return Err(SimError::ValidationError("at least one player is required".to_string()));
        }
        let heli = &self.heli;
        if !(heli.damage_min > 0.0 && heli.damage_min <= heli.damage_max) {
            return Err(SimError::ValidationError(format!(
                "damage range {}..={} is not valid",
                heli.damage_min, heli.damage_max
            )));
        }
        if !(heli.speed >= 0.0 && heli.health > 0.0) {
            return Err(SimError::ValidationError(
                "heli speed must be non-negative and health positive".to_string(),
            ));
        }
        Ok(())
    }
}
