//! ConfigStore - Settings file that heals itself
//!
//! A missing file is created with defaults. A file that cannot be read,
//! parsed or validated is replaced with defaults. An outdated file is
//! migrated and written back.

use super::{migrate, ConfigError, ConfigFormat, Settings};
use crate::logging::LOG_TARGET;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// How the settings returned by [`ConfigStore::load_or_regenerate`] came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// File was current and valid
    Loaded,
    /// File was valid but outdated; the migrated version was saved
    Migrated,
    /// No file existed; defaults were written
    Created,
    /// File was broken; defaults were written over it
    Regenerated,
}

/// A settings file on disk
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::from_path(&self.path)
    }

    /// Read and parse the file without migrating or validating
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let content = fs::read_to_string(&self.path)?;
        self.format().parse(&content)
    }

    /// Write settings, creating parent directories as needed
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = self.format().render(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load settings, falling back to defaults when the file is unusable
    ///
    /// Only fails if writing the file back fails.
    pub fn load_or_regenerate(&self) -> Result<(Settings, LoadStatus), ConfigError> {
        if !self.path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            info!(target: LOG_TARGET, "Created default configuration at {}", self.path.display());
            return Ok((settings, LoadStatus::Created));
        }

        let loaded = self.load().and_then(|mut settings| {
            let changed = migrate(&mut settings);
            settings.validate()?;
            Ok((settings, changed))
        });

        match loaded {
            Ok((settings, changed)) => {
                info!(target: LOG_TARGET, "Configuration loaded successfully.");
                if changed {
                    self.save(&settings)?;
                    return Ok((settings, LoadStatus::Migrated));
                }
                Ok((settings, LoadStatus::Loaded))
            }
            Err(err) => {
                error!(target: LOG_TARGET, "Failed to load config, creating default. ({})", err);
                let settings = Settings::default();
                self.save(&settings)?;
                warn!(target: LOG_TARGET, "Configuration file was invalid and has been regenerated.");
                Ok((settings, LoadStatus::Regenerated))
            }
        }
    }
}
