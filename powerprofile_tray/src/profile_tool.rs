// src/profile_tool.rs
use std::process::Command;

use crate::error::{Error, Result};
use crate::profile::Profile;

pub const DEFAULT_PROGRAM: &str = "powerprofilesctl";

/// Client for the daemon that actually enforces power profiles
pub trait ProfileTool: Send {
    /// Ask the daemon which profile is active
    fn get(&self) -> Result<String>;

    /// Ask the daemon to switch profiles
    fn set(&self, profile: Profile) -> Result<()>;
}

/// Talks to power-profiles-daemon through its command-line client
#[derive(Debug, Clone)]
pub struct PowerProfilesCtl {
    program: String,
}

impl PowerProfilesCtl {
    pub fn new(program: impl Into<String>) -> Self {
        PowerProfilesCtl {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for PowerProfilesCtl {
    fn default() -> Self {
        PowerProfilesCtl::new(DEFAULT_PROGRAM)
    }
}

impl ProfileTool for PowerProfilesCtl {
    fn get(&self) -> Result<String> {
        let profile = self.run(&["get"])?;
        if profile.is_empty() {
            return Err(Error::EmptyOutput {
                program: self.program.clone(),
            });
        }
        Ok(profile)
    }

    fn set(&self, profile: Profile) -> Result<()> {
        self.run(&["set", profile.as_str()])?;
        tracing::info!("{} set {}", self.program, profile);
        Ok(())
    }
}
