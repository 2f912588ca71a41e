//! Fire-and-forget termination signalling.
//!
//! The reader task owns the `Child` handle (it has to reap), so stopping
//! a worker is done by pid. The worker is expected to exit on SIGTERM;
//! reaping happens in the reader task once the output pipes close.

#[cfg(unix)]
pub(crate) fn terminate(pid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) => {}
        // Already gone: the reader observed the exit first.
        Err(Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pid, error = %e, "failed to signal worker"),
    }
}

#[cfg(not(unix))]
pub(crate) fn terminate(pid: u32) {
    tracing::warn!(pid, "graceful termination is not supported on this platform");
}
