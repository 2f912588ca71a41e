//! Panel page handler.

use axum::extract::State;
use axum::response::Html;

use crate::error::HttpError;
use crate::state::AppState;
use scribed_runtime::audio;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

/// Render the panel with the persisted settings and current sources.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, HttpError> {
    let settings = state.settings.load()?;
    let sources = audio::list_sources().await;

    let bootstrap = serde_json::json!({
        "config": settings,
        "sources": sources,
    })
    .to_string()
    // Keep the payload inert inside the inline <script> block.
    .replace('<', "\\u003c");

    Ok(Html(INDEX_TEMPLATE.replace("__BOOTSTRAP__", &bootstrap)))
}
