// src/testing.rs
//! In-memory stand-ins for the profile daemon and the notification service.
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::profile::Profile;
use crate::profile_tool::ProfileTool;

/// Fake daemon: `set` changes what `get` reports, like the real one.
#[derive(Debug, Clone, Default)]
pub struct FakeTool {
    pub live: Arc<Mutex<Option<String>>>,
    pub sets: Arc<Mutex<Vec<String>>>,
    pub fail_set: bool,
}

impl FakeTool {
    pub fn with_live(profile: &str) -> Self {
        let tool = FakeTool::default();
        *tool.live.lock().unwrap() = Some(profile.to_string());
        tool
    }

    pub fn sets(&self) -> Vec<String> {
        self.sets.lock().unwrap().clone()
    }
}

impl ProfileTool for FakeTool {
    fn get(&self) -> Result<String> {
        self.live.lock().unwrap().clone().ok_or(Error::EmptyOutput {
            program: "fake".to_string(),
        })
    }

    fn set(&self, profile: Profile) -> Result<()> {
        self.sets.lock().unwrap().push(profile.as_str().to_string());
        if self.fail_set {
            return Err(Error::EmptyOutput {
                program: "fake".to_string(),
            });
        }
        *self.live.lock().unwrap() = Some(profile.as_str().to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub icons: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn icons(&self) -> Vec<String> {
        self.icons.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str, icon: &str) -> Result<()> {
        self.icons.lock().unwrap().push(icon.to_string());
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}
