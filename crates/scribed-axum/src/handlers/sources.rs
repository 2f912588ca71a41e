//! Input source listing handler.

use axum::Json;

use scribed_runtime::audio;

/// List available PulseAudio capture sources.
pub async fn list() -> Json<Vec<String>> {
    Json(audio::list_sources().await)
}
