//! Live log stream handler.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;

use crate::sse::log_stream;
use crate::state::AppState;

/// Stream worker log lines to one viewer as Server-Sent Events.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    log_stream(Arc::clone(&state.broker))
}
