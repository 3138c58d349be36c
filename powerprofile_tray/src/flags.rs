// src/flags.rs
//! Flag files shared with the automation script.
//!
//! Every helper reports failure as an [`Error`] value; deciding whether a
//! failure matters is left to the caller.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const STATE_FILE: &str = "powerprofile.state";
pub const LAST_FILE: &str = "powerprofile.last";
pub const OVERRIDE_FILE: &str = "powerprofile.override";
pub const SILENT_FILE: &str = "powerprofile.silent";

/// Locations of the four flag files inside one cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    /// Profile currently chosen by the automation script
    pub state: PathBuf,
    /// Profile the automation script applied last
    pub last: PathBuf,
    /// Manual override; absent means auto mode
    pub override_file: PathBuf,
    /// Present when notifications are silenced
    pub silent: PathBuf,
}

impl StatePaths {
    pub fn in_dir(dir: &Path) -> Self {
        StatePaths {
            state: dir.join(STATE_FILE),
            last: dir.join(LAST_FILE),
            override_file: dir.join(OVERRIDE_FILE),
            silent: dir.join(SILENT_FILE),
        }
    }
}

/// Read a flag file, trimmed. Missing or blank files are `Ok(None)`.
pub fn read_trimmed(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let value = content.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace the file content, creating the parent directory when missing.
pub fn write_flag(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove a flag file. Removing a file that is already gone succeeds.
pub fn remove_flag(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn flag_exists(path: &Path) -> bool {
    path.exists()
}
