// src/error.rs
use std::path::PathBuf;
use std::process::ExitStatus;

/// Failures at the boundaries the tray talks to: flag files, the profile
/// tool, the notification service and the tray host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{program} returned no output")]
    EmptyOutput { program: String },
    #[error("notification failed: {0}")]
    Notify(String),
    #[error("no StatusNotifierItem host available: {0}")]
    TrayUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
