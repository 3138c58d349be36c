// src/lib.rs
//! Tray indicator for power-profiles-daemon.
//!
//! The tray shows the active profile and whether the automation script is in
//! charge (auto) or the user pinned a profile (manual). All state lives in
//! small flag files in the user's cache directory.

pub mod config;
pub mod error;
pub mod flags;
pub mod notifier;
pub mod profile;
pub mod profile_controller;
pub mod profile_tool;
pub mod tray_manager;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
