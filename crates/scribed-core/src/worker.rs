//! Translation of panel settings into the worker's own settings file.
//!
//! `faster-whisper-hotkey` reads its configuration from
//! `transcriber_settings.json` with its own field names; this module maps
//! the panel's model/device choices onto that format.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::settings::Settings;

/// The worker's settings file contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerSettings {
    /// Concrete PulseAudio source name; never "auto" here.
    pub device_name: String,
    pub model_type: String,
    pub model_name: String,
    pub compute_type: String,
    pub device: String,
    pub language: String,
    pub hotkey: String,
}

impl WorkerSettings {
    /// Derive worker settings from panel settings.
    ///
    /// `device_name` must already be resolved: callers replace an "auto"
    /// input device with the system default source before deriving.
    pub fn derive(settings: &Settings, device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            model_type: model_type_for(&settings.model).to_string(),
            model_name: model_name_for(&settings.model),
            compute_type: settings.compute_type.clone(),
            device: settings.device.clone(),
            language: settings.language.clone(),
            hotkey: settings.hotkey.clone(),
        }
    }

    /// Write the worker settings file, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, body).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Worker backend for a given panel model choice.
fn model_type_for(model: &str) -> &'static str {
    match model {
        "parakeet-tdt-0.6b-v3" => "parakeet",
        "canary-1b-v2" => "canary",
        _ => "whisper",
    }
}

/// Full model identifier the worker should load.
///
/// The NVIDIA models are published under the `nvidia/` namespace on the
/// Hugging Face hub; whisper model names pass through untouched.
fn model_name_for(model: &str) -> String {
    match model {
        "parakeet-tdt-0.6b-v3" => "nvidia/parakeet-tdt-0.6b-v3".to_string(),
        "canary-1b-v2" => "nvidia/canary-1b-v2".to_string(),
        other => other.to_string(),
    }
}
