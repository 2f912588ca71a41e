//! Settings handler - panel configuration updates.

use axum::Json;
use axum::extract::State;

use crate::error::HttpError;
use crate::handlers::control::ControlResponse;
use crate::state::AppState;
use scribed_core::SettingsPatch;

/// Persist a settings update.
///
/// Deserializing into [`SettingsPatch`] enforces the key allow-list:
/// unknown keys are silently dropped and never reach disk.
pub async fn update(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<ControlResponse>, HttpError> {
    state.settings.save(&patch)?;
    Ok(Json(ControlResponse {
        ok: true,
        error: None,
    }))
}
