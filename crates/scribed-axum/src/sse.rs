//! Live log streaming over Server-Sent Events.
//!
//! Each viewer runs its own drain loop against the shared [`LogBroker`]:
//! a bounded pop either yields a line (emitted as a data event) or times
//! out (emitted as a comment event, keeping proxies and the browser's
//! connection timeout from closing an idle stream). The loop ends when
//! the transport drops the response stream; there is no other
//! cancellation path.
//!
//! The broker is a single shared queue, so simultaneous viewers split the
//! line stream between them rather than each receiving a full copy.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use futures_util::StreamExt;
use scribed_runtime::LogBroker;

/// Idle period after which a keepalive comment is emitted.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(1);

/// One frame of a viewer's log feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFrame {
    /// A worker log line.
    Line(String),
    /// Nothing arrived within the keepalive interval.
    Keepalive,
}

/// Endless frame stream for one viewer: lines when available, keepalives
/// when idle.
pub fn log_frames(
    broker: Arc<LogBroker>,
    keepalive_interval: Duration,
) -> impl Stream<Item = LogFrame> + Send + 'static {
    async_stream::stream! {
        loop {
            match broker.pop(keepalive_interval).await {
                Some(line) => yield LogFrame::Line(line),
                None => yield LogFrame::Keepalive,
            }
        }
    }
}

/// SSE response streaming log frames to one viewer.
pub fn log_stream(
    broker: Arc<LogBroker>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let stream = log_frames(broker, KEEPALIVE_INTERVAL).map(|frame| {
        Ok(match frame {
            LogFrame::Line(line) => Event::default().data(line),
            LogFrame::Keepalive => Event::default().comment("ping"),
        })
    });
    Sse::new(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const TICK: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn idle_stream_emits_only_keepalives() {
        let broker = Arc::new(LogBroker::new(8));
        let mut frames = Box::pin(log_frames(broker, TICK));

        // Three keepalive intervals of silence produce keepalive frames
        // and nothing else.
        for _ in 0..3 {
            let frame = timeout(Duration::from_secs(1), frames.next())
                .await
                .expect("frame before timeout")
                .expect("stream is endless");
            assert_eq!(frame, LogFrame::Keepalive);
        }
    }

    #[tokio::test]
    async fn queued_lines_become_data_frames_in_order() {
        let broker = Arc::new(LogBroker::new(8));
        broker.push("first");
        broker.push("second");
        let mut frames = Box::pin(log_frames(Arc::clone(&broker), TICK));

        let a = timeout(Duration::from_secs(1), frames.next()).await.unwrap();
        let b = timeout(Duration::from_secs(1), frames.next()).await.unwrap();
        assert_eq!(a, Some(LogFrame::Line("first".to_string())));
        assert_eq!(b, Some(LogFrame::Line("second".to_string())));
    }

    #[tokio::test]
    async fn line_after_idle_period_still_arrives() {
        let broker = Arc::new(LogBroker::new(8));
        let mut frames = Box::pin(log_frames(Arc::clone(&broker), TICK));

        let idle = timeout(Duration::from_secs(1), frames.next()).await.unwrap();
        assert_eq!(idle, Some(LogFrame::Keepalive));

        broker.push("late line");
        let frame = timeout(Duration::from_secs(1), frames.next()).await.unwrap();
        assert_eq!(frame, Some(LogFrame::Line("late line".to_string())));
    }
}
