//! Leash and notification settings

use super::{ConfigError, CONFIG_VERSION};
use serde::{Deserialize, Serialize};

/// Default chat color hint
pub const DEFAULT_CHAT_COLOR: &str = "#ff4d4d";

/// Default broadcast template: `{0}` is the attacker name, `{1}` the grid label
pub const DEFAULT_MESSAGE_FORMAT: &str =
    "🚁 <color=#ff4d4d>Helicopter is staying close to {0} at [<color=#ffd700>{1}</color>]</color>";

/// Complete settings document
///
/// Keys are snake_case. The property names used by the legacy plugin config
/// ("Enable leash behavior", ...) are accepted as aliases so an old JSON
/// file loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version", alias = "Config Version")]
    pub version: String,
    #[serde(flatten)]
    pub leash: LeashConfig,
    #[serde(flatten)]
    pub notification: NotificationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            leash: LeashConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl Settings {
    /// Reject values the leash logic cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("health_threshold", self.leash.health_threshold)?;
        check_non_negative("max_distance", self.leash.max_distance)?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

/// When and how hard the helicopter is pulled back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeashConfig {
    #[serde(default = "default_true", alias = "Enable leash behavior")]
    pub enable_leash: bool,
    /// Leash engages once health is at or below this value
    #[serde(
        default = "default_health_threshold",
        alias = "Health threshold to enable leash (e.g. 400)"
    )]
    pub health_threshold: f32,
    /// Maximum allowed distance from the attacker
    #[serde(default = "default_max_distance", alias = "Max allowed distance from attacker")]
    pub max_distance: f32,
    #[serde(default, alias = "Enable debug messages in console")]
    pub enable_debug: bool,
}

impl Default for LeashConfig {
    fn default() -> Self {
        LeashConfig {
            enable_leash: true,
            health_threshold: 400.0,
            max_distance: 150.0,
            enable_debug: false,
        }
    }
}

impl LeashConfig {
    /// Distance from the attacker at which the new navigation target is placed
    pub fn retarget_offset(&self) -> f32 {
        self.max_distance * 0.5
    }
}

fn default_true() -> bool {
    true
}
fn default_health_threshold() -> f32 {
    400.0
}
fn default_max_distance() -> f32 {
    150.0
}

/// Server-wide chat announcement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true", alias = "Send global chat message when heli is leashed")]
    pub send_chat_message: bool,
    /// Opaque color hint passed along with every chat line
    #[serde(default = "default_chat_color", alias = "Chat message color (hex)")]
    pub chat_message_color: String,
    #[serde(default = "default_message_format", alias = "Global chat message format")]
    pub global_message_format: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            send_chat_message: true,
            chat_message_color: default_chat_color(),
            global_message_format: default_message_format(),
        }
    }
}

impl NotificationConfig {
    /// Put back defaults for blank color or template. Returns true if anything changed.
    pub fn restore_empty_defaults(&mut self) -> bool {
        let mut changed = false;
        if self.chat_message_color.trim().is_empty() {
            self.chat_message_color = default_chat_color();
            changed = true;
        }
        if self.global_message_format.trim().is_empty() {
            self.global_message_format = default_message_format();
            changed = true;
        }
        changed
    }
}

fn default_chat_color() -> String {
    DEFAULT_CHAT_COLOR.to_string()
}
fn default_message_format() -> String {
    DEFAULT_MESSAGE_FORMAT.to_string()
}
