//! Worker control handlers - start/stop/status.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::HttpError;
use crate::state::AppState;
use scribed_core::WorkerSettings;
use scribed_runtime::SupervisorError;
use scribed_runtime::audio;

/// Outcome body for control operations.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ControlResponse {
    fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Start the worker.
///
/// Writes the derived worker settings file first so the worker picks up
/// the current panel configuration, then asks the supervisor to launch.
/// A lost race against a concurrent start is reported the same way as the
/// early already-running check.
pub async fn start(State(state): State<AppState>) -> Result<Json<ControlResponse>, HttpError> {
    if state.supervisor.is_running().await {
        return Ok(Json(ControlResponse::rejected("Already running")));
    }

    let settings = state.settings.load()?;
    let device_name = if settings.input_device == "auto" {
        audio::default_source().await
    } else {
        settings.input_device.clone()
    };
    WorkerSettings::derive(&settings, device_name).write(&state.worker_settings_path)?;

    match state.supervisor.start().await {
        Ok(()) => Ok(Json(ControlResponse::ok())),
        Err(SupervisorError::AlreadyRunning) => {
            Ok(Json(ControlResponse::rejected("Already running")))
        }
        Err(err @ SupervisorError::Launch(_)) => {
            Err(HttpError::ServiceUnavailable(err.to_string()))
        }
    }
}

/// Stop the worker. Always succeeds.
pub async fn stop(State(state): State<AppState>) -> Json<ControlResponse> {
    state.supervisor.stop().await;
    Json(ControlResponse::ok())
}

/// Current run state.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
}

/// Report whether the worker is running.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: state.supervisor.is_running().await,
    })
}
