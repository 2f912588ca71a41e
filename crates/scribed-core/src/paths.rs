//! Default file locations.

use std::path::PathBuf;

/// Default location of the panel settings file.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scribed")
        .join("settings.json")
}

/// Location of the worker's own settings file.
///
/// Fixed by `faster-whisper-hotkey` itself, which reads
/// `~/.config/faster_whisper_hotkey/transcriber_settings.json` regardless
/// of XDG overrides.
pub fn worker_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("faster_whisper_hotkey")
        .join("transcriber_settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_settings_path_matches_worker_expectation() {
        let path = worker_settings_path();
        assert!(path.ends_with(".config/faster_whisper_hotkey/transcriber_settings.json"));
    }

    #[test]
    fn settings_path_is_namespaced() {
        let path = default_settings_path();
        assert!(path.ends_with("scribed/settings.json"));
    }
}
