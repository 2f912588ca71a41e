//! Panel settings and partial updates.

use serde::{Deserialize, Serialize};

/// Panel settings, fully resolved.
///
/// Missing fields deserialize to their defaults, so a settings file that
/// only stores a subset of keys reads back merged over the default
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Push-to-talk key the worker listens for.
    pub hotkey: String,
    /// Transcription language; empty string means auto-detect.
    pub language: String,
    /// Inference device ("cpu" or "cuda").
    pub device: String,
    /// Inference precision.
    pub compute_type: String,
    /// Transcription model identifier.
    pub model: String,
    /// PulseAudio input source name, or "auto" for the system default.
    pub input_device: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: "pause".to_string(),
            language: String::new(),
            device: "cpu".to_string(),
            compute_type: "float16".to_string(),
            model: "parakeet-tdt-0.6b-v3".to_string(),
            input_device: "auto".to_string(),
        }
    }
}

/// Partial settings update from the panel.
///
/// This is the persistence allow-list: only these keys survive a settings
/// POST. Unknown keys in the incoming JSON are dropped by serde, and
/// absent fields serialize to nothing, so the stored file contains exactly
/// the keys the client provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_device: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_worker_expectations() {
        let settings = Settings::default();
        assert_eq!(settings.hotkey, "pause");
        assert_eq!(settings.language, "");
        assert_eq!(settings.device, "cpu");
        assert_eq!(settings.compute_type, "float16");
        assert_eq!(settings.model, "parakeet-tdt-0.6b-v3");
        assert_eq!(settings.input_device, "auto");
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let settings: Settings = serde_json::from_value(json!({"hotkey": "f9"})).unwrap();
        assert_eq!(settings.hotkey, "f9");
        assert_eq!(settings.device, "cpu");
        assert_eq!(settings.model, "parakeet-tdt-0.6b-v3");
    }

    #[test]
    fn patch_drops_unknown_keys() {
        let patch: SettingsPatch =
            serde_json::from_value(json!({"hotkey": "f9", "bogus": "x"})).unwrap();
        assert_eq!(patch.hotkey.as_deref(), Some("f9"));
        assert!(patch.language.is_none());

        let stored = serde_json::to_value(&patch).unwrap();
        assert_eq!(stored, json!({"hotkey": "f9"}));
    }
}
