//! Settings schema migration

use super::Settings;
use crate::logging::LOG_TARGET;
use log::warn;

/// Schema version written by this build
pub const CONFIG_VERSION: &str = "1.0.15";

/// Bring settings up to the current schema
///
/// Stamps the current version and restores defaults for blank chat fields.
/// Returns true if anything changed and the file should be written back.
pub fn migrate(settings: &mut Settings) -> bool {
    let mut changed = false;

    if settings.version != CONFIG_VERSION {
        let old = if settings.version.is_empty() {
            "<none>"
        } else {
            settings.version.as_str()
        };
        warn!(
            target: LOG_TARGET,
            "Config version {} is outdated; upgrading to {}", old, CONFIG_VERSION
        );
        settings.version = CONFIG_VERSION.to_string();
        changed = true;
    }

    if settings.notification.restore_empty_defaults() {
        changed = true;
    }

    changed
}
