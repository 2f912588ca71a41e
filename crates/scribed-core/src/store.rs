//! Settings file persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::settings::{Settings, SettingsPatch};

/// Reads and writes the panel settings file.
///
/// The file stores only the keys the client last submitted; [`load`]
/// merges them over [`Settings::default`]. A missing file is not an error
/// and yields the defaults.
///
/// [`load`]: SettingsStore::load
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, merging the stored keys over the defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist a settings patch, replacing the stored file.
    ///
    /// Keys absent from the patch are not carried over from the previous
    /// file; they fall back to defaults on the next load.
    pub fn save(&self, patch: &SettingsPatch) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(patch).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
