// src/profile_controller.rs
use crate::error::Result;
use crate::flags::{self, StatePaths};
use crate::notifier::{Notifier, NOTIFICATION_TITLE};
use crate::profile::{Mode, Profile, DEFAULT_PROFILE};
use crate::profile_tool::ProfileTool;

/// Everything the tray shows, captured at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub profile: String,
    pub auto: bool,
    pub notify: bool,
}

/// Reads the flag files and the daemon, and persists the user's choices.
pub struct ProfileController {
    paths: StatePaths,
    tool: Box<dyn ProfileTool>,
    notifier: Box<dyn Notifier>,
    rendered: Option<Snapshot>,
}

impl ProfileController {
    pub fn new(
        paths: StatePaths,
        tool: impl ProfileTool + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        ProfileController {
            paths,
            tool: Box::new(tool),
            notifier: Box::new(notifier),
            rendered: None,
        }
    }

    pub fn paths(&self) -> &StatePaths {
        &self.paths
    }

    /// Current profile: state file, then last-applied file, then the daemon,
    /// then `balanced`.
    pub fn get_profile(&self) -> String {
        for path in [&self.paths.state, &self.paths.last] {
            match flags::read_trimmed(path) {
                Ok(Some(profile)) => return profile,
                Ok(None) => {}
                Err(e) => tracing::debug!("{}", e),
            }
        }

        match self.tool.get() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!("live profile query failed: {}", e);
                DEFAULT_PROFILE.to_string()
            }
        }
    }

    pub fn is_auto(&self) -> bool {
        !flags::flag_exists(&self.paths.override_file)
    }

    pub fn notifications_enabled(&self) -> bool {
        !flags::flag_exists(&self.paths.silent)
    }

    /// Persist the requested mode. A manual profile is also applied right away
    /// so the user does not wait for the automation script.
    pub fn set_state(&self, mode: Mode) -> Result<()> {
        let (message, icon) = match mode {
            Mode::Auto => {
                flags::remove_flag(&self.paths.override_file)?;
                tracing::info!("override cleared, back to auto mode");
                let running = Profile::parse(&self.get_profile()).unwrap_or(Profile::Balanced);
                ("Auto mode (override cleared)".to_string(), running.icon_name())
            }
            Mode::Manual(profile) => {
                flags::write_flag(&self.paths.override_file, profile.as_str())?;
                self.tool.set(profile)?;
                tracing::info!("manual override: {}", profile);
                (
                    format!("{} mode activated", profile.display_name()),
                    profile.icon_name(),
                )
            }
        };

        if self.notifications_enabled() {
            if let Err(e) = self.notifier.notify(NOTIFICATION_TITLE, &message, icon) {
                tracing::warn!("{}", e);
            }
        }

        Ok(())
    }

    pub fn set_notifications(&self, enabled: bool) -> Result<()> {
        if enabled {
            flags::remove_flag(&self.paths.silent)
        } else {
            flags::write_flag(&self.paths.silent, "")
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.get_profile(),
            auto: self.is_auto(),
            notify: self.notifications_enabled(),
        }
    }

    /// Last snapshot handed to the tray
    pub fn rendered(&self) -> Option<&Snapshot> {
        self.rendered.as_ref()
    }

    /// Take a fresh snapshot. Returns it when it differs from what was last
    /// rendered.
    pub fn poll(&mut self) -> Option<&Snapshot> {
        let current = self.snapshot();
        if self.rendered.as_ref() == Some(&current) {
            return None;
        }
        tracing::debug!("state changed: {:?}", current);
        self.rendered = Some(current);
        self.rendered.as_ref()
    }

    /// Unconditionally re-read the state, used right after a menu action.
    pub fn refresh(&mut self) -> &Snapshot {
        self.rendered.insert(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTool, RecordingNotifier};
    use std::fs;

    fn controller(
        dir: &std::path::Path,
        tool: FakeTool,
    ) -> (ProfileController, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let ctrl = ProfileController::new(StatePaths::in_dir(dir), tool, notifier.clone());
        (ctrl, notifier)
    }

    #[test]
    fn test_profile_preference_chain() {
        let dir = tempfile::tempdir().unwrap();
        let (ctrl, _) = controller(dir.path(), FakeTool::with_live("performance"));

        assert_eq!(ctrl.get_profile(), "performance");

        fs::write(&ctrl.paths().last, "balanced\n").unwrap();
        assert_eq!(ctrl.get_profile(), "balanced");

        fs::write(&ctrl.paths().state, "power-saver").unwrap();
        assert_eq!(ctrl.get_profile(), "power-saver");

        // Blank state file falls through to the last-applied one
        fs::write(&ctrl.paths().state, "  \n").unwrap();
        assert_eq!(ctrl.get_profile(), "balanced");
    }

    #[test]
    fn test_profile_defaults_to_balanced() {
        let dir = tempfile::tempdir().unwrap();
        let (ctrl, _) = controller(dir.path(), FakeTool::default());
        assert_eq!(ctrl.get_profile(), "balanced");
    }

    #[test]
    fn test_is_auto_follows_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let (ctrl, _) = controller(dir.path(), FakeTool::default());

        assert!(ctrl.is_auto());
        fs::write(&ctrl.paths().override_file, "whatever").unwrap();
        assert!(!ctrl.is_auto());
        fs::remove_file(&ctrl.paths().override_file).unwrap();
        assert!(ctrl.is_auto());
    }

    #[test]
    fn test_notifications_follow_silent_file() {
        let dir = tempfile::tempdir().unwrap();
        let (ctrl, _) = controller(dir.path(), FakeTool::default());

        assert!(ctrl.notifications_enabled());
        ctrl.set_notifications(false).unwrap();
        assert!(ctrl.paths().silent.exists());
        assert!(!ctrl.notifications_enabled());
        ctrl.set_notifications(true).unwrap();
        assert!(ctrl.notifications_enabled());
    }

    #[test]
    fn test_set_auto_removes_override_without_calling_tool() {
        let dir = tempfile::tempdir().unwrap();
        let tool = FakeTool::with_live("balanced");
        let (ctrl, notifier) = controller(dir.path(), tool.clone());
        fs::write(&ctrl.paths().override_file, "performance").unwrap();

        ctrl.set_state(Mode::Auto).unwrap();

        assert!(!ctrl.paths().override_file.exists());
        assert!(tool.sets().is_empty());
        assert_eq!(
            notifier.sent(),
            vec![(
                "Power Profile".to_string(),
                "Auto mode (override cleared)".to_string()
            )]
        );

        assert_eq!(notifier.icons(), vec!["power-profile-balanced-symbolic"]);

        // Already in auto mode: still fine
        ctrl.set_state(Mode::Auto).unwrap();
    }

    #[test]
    fn test_set_manual_writes_override_and_applies() {
        let dir = tempfile::tempdir().unwrap();
        let tool = FakeTool::with_live("balanced");
        let (ctrl, notifier) = controller(&dir.path().join("missing/cache"), tool.clone());

        ctrl.set_state(Mode::Manual(Profile::Performance)).unwrap();

        assert_eq!(
            fs::read_to_string(&ctrl.paths().override_file).unwrap(),
            "performance"
        );
        assert_eq!(tool.sets(), vec!["performance"]);
        assert_eq!(notifier.sent()[0].1, "Performance mode activated");
        assert_eq!(notifier.icons(), vec!["power-profile-performance-symbolic"]);
    }

    #[test]
    fn test_silenced_controller_does_not_notify() {
        let dir = tempfile::tempdir().unwrap();
        let (ctrl, notifier) = controller(dir.path(), FakeTool::default());
        ctrl.set_notifications(false).unwrap();

        ctrl.set_state(Mode::Manual(Profile::PowerSaver)).unwrap();
        ctrl.set_state(Mode::Auto).unwrap();

        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_failed_apply_keeps_override() {
        let dir = tempfile::tempdir().unwrap();
        let tool = FakeTool {
            fail_set: true,
            ..FakeTool::default()
        };
        let (ctrl, notifier) = controller(dir.path(), tool);

        assert!(ctrl.set_state(Mode::Manual(Profile::Balanced)).is_err());
        assert!(!ctrl.is_auto());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_poll_reports_changes_once() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctrl, _) = controller(dir.path(), FakeTool::with_live("balanced"));

        let first = ctrl.poll().cloned().unwrap();
        assert_eq!(
            first,
            Snapshot {
                profile: "balanced".to_string(),
                auto: true,
                notify: true,
            }
        );
        assert!(ctrl.poll().is_none());

        fs::write(&ctrl.paths().state, "power-saver").unwrap();
        assert_eq!(ctrl.poll().unwrap().profile, "power-saver");
        assert!(ctrl.poll().is_none());

        fs::write(&ctrl.paths().silent, "").unwrap();
        assert!(!ctrl.poll().unwrap().notify);
        assert_eq!(ctrl.rendered().unwrap().profile, "power-saver");
    }
}
