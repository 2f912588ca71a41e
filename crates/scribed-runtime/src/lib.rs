//! Process supervision and OS-level concerns for scribed.
//!
//! This crate owns the lifecycle of the transcription worker process and
//! the bounded queue its output is pumped through, plus the PulseAudio
//! source enumeration the panel needs. HTTP concerns live in
//! `scribed-axum`.

pub mod audio;
pub mod broker;
mod shutdown;
pub mod supervisor;

pub use broker::{DEFAULT_LOG_CAPACITY, LogBroker};
pub use supervisor::{SupervisorError, WorkerSupervisor};
