//! Bounded mailbox for worker log lines.

use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::time;

/// Default queue capacity in lines.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Fixed-capacity FIFO queue of log lines.
///
/// Writes never block: when the queue is full the incoming line is
/// discarded, keeping the earliest available history rather than the most
/// recent lines. Reads block up to a timeout and return the oldest line.
///
/// This is a single shared queue, not a broadcast channel: with several
/// consumers popping at once, each line is delivered to exactly one of
/// them. Concurrent log viewers therefore see an interleaved split of the
/// stream, not a mirrored copy.
pub struct LogBroker {
    tx: mpsc::Sender<String>,
    rx: Mutex<mpsc::Receiver<String>>,
}

impl LogBroker {
    /// Create a broker holding at most `capacity` lines (must be > 0).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Append a line, discarding it if the queue is full. Never blocks.
    pub fn push(&self, line: impl Into<String>) {
        let _ = self.tx.try_send(line.into());
    }

    /// Pop the oldest line, waiting up to `timeout` for one to arrive.
    ///
    /// Returns `None` when the timeout elapses with nothing queued.
    pub async fn pop(&self, timeout: Duration) -> Option<String> {
        // The broker owns a sender for its whole lifetime, so recv() can
        // only resolve with a line; the timeout is the sole None source.
        time::timeout(timeout, async { self.rx.lock().await.recv().await })
            .await
            .ok()
            .flatten()
    }
}

impl Default for LogBroker {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
