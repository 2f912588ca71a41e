//! Worker process lifecycle management.
//!
//! At most one worker runs at a time. All state transitions happen under
//! one async mutex; the only syscalls inside the critical section are the
//! spawn itself and the (non-blocking) termination signal. Output pumping
//! and process reaping run in a detached reader task tied to the spawned
//! process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::broker::LogBroker;
use crate::shutdown;

/// Failure starting the worker.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A worker is already running; expected under concurrent starts.
    #[error("worker is already running")]
    AlreadyRunning,

    /// The worker executable could not be spawned.
    #[error("failed to launch worker: {0}")]
    Launch(#[source] std::io::Error),
}

/// Bookkeeping for the running worker.
///
/// The `Child` itself lives in the reader task, which must reap it; the
/// supervisor signals by pid.
#[derive(Debug, Clone, Copy)]
struct WorkerHandle {
    pid: u32,
}

/// Supervises the single transcription worker process.
pub struct WorkerSupervisor {
    program: PathBuf,
    broker: Arc<LogBroker>,
    handle: Arc<Mutex<Option<WorkerHandle>>>,
}

impl WorkerSupervisor {
    /// Create a supervisor for `program`, pumping its output into `broker`.
    pub fn new(program: impl Into<PathBuf>, broker: Arc<LogBroker>) -> Self {
        Self {
            program: program.into(),
            broker,
            handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the worker.
    ///
    /// The executable is launched with no arguments and an unmodified
    /// environment; stdout and stderr are pumped into the log broker by a
    /// detached reader task that also reaps the process when it exits.
    pub async fn start(&self) -> Result<(), SupervisorError> {
        let mut guard = self.handle.lock().await;
        if guard.is_some() {
            return Err(SupervisorError::AlreadyRunning);
        }

        let mut child = Command::new(&self.program)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(SupervisorError::Launch)?;
        let pid = child
            .id()
            .ok_or_else(|| SupervisorError::Launch(std::io::Error::other("worker has no pid")))?;

        *guard = Some(WorkerHandle { pid });
        tokio::spawn(pump_worker_output(
            child,
            pid,
            Arc::clone(&self.broker),
            Arc::clone(&self.handle),
        ));

        info!(pid, program = %self.program.display(), "worker started");
        Ok(())
    }

    /// Stop the worker. Idempotent; never fails from the caller's view.
    ///
    /// Sends a termination signal without waiting for the exit; reaping
    /// happens in the reader task once the output pipes close.
    pub async fn stop(&self) {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.take() {
            info!(pid = handle.pid, "stopping worker");
            shutdown::terminate(handle.pid);
        }
    }

    /// Whether a worker is currently running.
    pub async fn is_running(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}

/// Reader task: pump combined output into the broker, then reap.
///
/// Runs without the supervisor lock until both pipes hit end-of-stream;
/// it only takes the lock at the very end, to clear the handle after a
/// natural exit. The pid comparison keeps it from clobbering a newer
/// worker started after a `stop()`.
async fn pump_worker_output(
    mut child: Child,
    pid: u32,
    broker: Arc<LogBroker>,
    handle: Arc<Mutex<Option<WorkerHandle>>>,
) {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    tokio::join!(pump_lines(stdout, &broker), pump_lines(stderr, &broker));

    match child.wait().await {
        Ok(status) => debug!(pid, %status, "worker exited"),
        Err(e) => warn!(pid, error = %e, "failed to reap worker"),
    }

    let mut guard = handle.lock().await;
    if guard.is_some_and(|h| h.pid == pid) {
        *guard = None;
    }
}

async fn pump_lines<R: AsyncRead + Unpin>(stream: Option<R>, broker: &LogBroker) {
    let Some(stream) = stream else { return };
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        broker.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn supervisor(program: impl Into<PathBuf>) -> (WorkerSupervisor, Arc<LogBroker>) {
        let broker = Arc::new(LogBroker::new(200));
        (
            WorkerSupervisor::new(program, Arc::clone(&broker)),
            broker,
        )
    }

    /// Write an executable shell script to use as a stand-in worker.
    #[cfg(unix)]
    fn script_worker(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("worker.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = std::fs::metadata(&path).expect("stat script").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod script");
        path
    }

    /// Poll until the supervisor reports stopped, or time out.
    async fn wait_until_stopped(supervisor: &WorkerSupervisor) -> bool {
        for _ in 0..40 {
            if !supervisor.is_running().await {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        false
    }

    #[tokio::test]
    async fn launch_failure_reports_cause_and_stays_stopped() {
        let dir = TempDir::new().unwrap();
        let (supervisor, _broker) = supervisor(dir.path().join("missing-worker"));

        let err = supervisor.start().await.expect_err("start should fail");
        assert!(matches!(err, SupervisorError::Launch(_)));
        assert!(!supervisor.is_running().await);
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let (supervisor, _broker) = supervisor(dir.path().join("missing-worker"));

        supervisor.stop().await;
        assert!(!supervisor.is_running().await);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn start_stop_round_trip() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "exec sleep 30");
        let (supervisor, _broker) = supervisor(worker);

        supervisor.start().await.expect("start");
        assert!(supervisor.is_running().await);

        supervisor.stop().await;
        assert!(!supervisor.is_running().await);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn second_start_is_rejected() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "exec sleep 30");
        let (supervisor, _broker) = supervisor(worker);

        supervisor.start().await.expect("start");
        let err = supervisor.start().await.expect_err("second start");
        assert!(matches!(err, SupervisorError::AlreadyRunning));

        supervisor.stop().await;
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn concurrent_starts_admit_exactly_one() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "exec sleep 30");
        let (supervisor, _broker) = supervisor(worker);

        let (a, b, c, d) = tokio::join!(
            supervisor.start(),
            supervisor.start(),
            supervisor.start(),
            supervisor.start()
        );
        let results = [a, b, c, d];
        let started = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(SupervisorError::AlreadyRunning)))
            .count();
        assert_eq!(started, 1);
        assert_eq!(rejected, 3);

        supervisor.stop().await;
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn restart_after_stop_succeeds() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "exec sleep 30");
        let (supervisor, _broker) = supervisor(worker);

        supervisor.start().await.expect("first start");
        supervisor.stop().await;
        supervisor.start().await.expect("restart");
        assert!(supervisor.is_running().await);

        supervisor.stop().await;
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn natural_exit_clears_state() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "echo done");
        let (supervisor, _broker) = supervisor(worker);

        supervisor.start().await.expect("start");
        assert!(
            wait_until_stopped(&supervisor).await,
            "reader task never observed the exit"
        );
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn combined_output_reaches_the_broker() {
        let dir = TempDir::new().unwrap();
        let worker = script_worker(dir.path(), "echo out-line\necho err-line >&2\nexec sleep 30");
        let (supervisor, broker) = supervisor(worker);

        supervisor.start().await.expect("start");

        let timeout = Duration::from_secs(2);
        let mut got = vec![
            broker.pop(timeout).await.expect("first line"),
            broker.pop(timeout).await.expect("second line"),
        ];
        got.sort();
        assert_eq!(got, vec!["err-line".to_string(), "out-line".to_string()]);

        supervisor.stop().await;
    }
}
