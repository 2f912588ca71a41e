//! Domain types for the scribed control panel.
//!
//! Pure configuration concerns: the panel's own settings file, the
//! translation of those settings into the transcriber worker's expected
//! settings format, and the default file locations for both. No process
//! or HTTP knowledge lives here.

pub mod error;
pub mod paths;
pub mod settings;
pub mod store;
pub mod worker;

pub use error::SettingsError;
pub use settings::{Settings, SettingsPatch};
pub use store::SettingsStore;
pub use worker::WorkerSettings;
