// src/tray_manager.rs
use ksni::menu::{CheckmarkItem, StandardItem};
use ksni::{Category, MenuItem, Status, ToolTip, Tray, TrayMethods};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use crate::error::{Error, Result};
use crate::profile::{self, LabelStyle, Mode, Profile};
use crate::profile_controller::{ProfileController, Snapshot};

/// Stable StatusNotifierItem id
pub const TRAY_ID: &str = "powerprofile-indicator";

const THEMES: [&str; 2] = ["Adwaita", "hicolor"];
const ICON_SUBDIRS: [&str; 2] = ["symbolic/status", "scalable/status"];

/// Which icons the tray shows, decided once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStrategy {
    /// The theme ships `power-profile-*-symbolic`; unknown profiles use the fallback
    PerProfile { fallback: String },
    /// One icon regardless of profile
    Fixed(String),
}

impl IconStrategy {
    /// Look for the profile icons in the usual themes under `data_dirs`.
    pub fn detect(data_dirs: &[PathBuf], fallback: &str) -> Self {
        let probe = format!("{}.svg", Profile::Balanced.icon_name());
        let found = data_dirs.iter().any(|dir| {
            THEMES.iter().any(|theme| {
                ICON_SUBDIRS
                    .iter()
                    .any(|sub| dir.join("icons").join(theme).join(sub).join(&probe).exists())
            })
        });

        if found {
            tracing::debug!("using per-profile symbolic icons");
            IconStrategy::PerProfile {
                fallback: fallback.to_string(),
            }
        } else {
            tracing::debug!("profile icons not found, using {}", fallback);
            IconStrategy::Fixed(fallback.to_string())
        }
    }

    pub fn icon_name(&self, profile: &str) -> String {
        match self {
            IconStrategy::PerProfile { fallback } => Profile::parse(profile)
                .map(|p| p.icon_name().to_string())
                .unwrap_or_else(|| fallback.clone()),
            IconStrategy::Fixed(name) => name.clone(),
        }
    }
}

/// The tray icon, its label and its menu
pub struct PowerProfileTray {
    controller: ProfileController,
    style: LabelStyle,
    icons: IconStrategy,
    quit: Arc<Notify>,
}

impl PowerProfileTray {
    pub fn new(
        mut controller: ProfileController,
        style: LabelStyle,
        icons: IconStrategy,
        quit: Arc<Notify>,
    ) -> Self {
        controller.refresh();
        PowerProfileTray {
            controller,
            style,
            icons,
            quit,
        }
    }

    fn current(&self) -> Snapshot {
        self.controller
            .rendered()
            .cloned()
            .unwrap_or_else(|| self.controller.snapshot())
    }

    pub fn label(&self) -> String {
        let snapshot = self.current();
        self.style.render(&snapshot.profile, snapshot.auto)
    }

    /// Timer tick. Returns true when the tray needs redrawing.
    pub fn poll(&mut self) -> bool {
        self.controller.poll().is_some()
    }

    fn apply(&mut self, mode: Mode) {
        if let Err(e) = self.controller.set_state(mode) {
            tracing::warn!("failed to switch to {}: {}", mode, e);
        }
        self.controller.refresh();
    }

    /// Unchecking auto pins the profile that is running right now.
    fn toggle_auto(&mut self) {
        let mode = if self.controller.is_auto() {
            let running = self.controller.get_profile();
            Mode::Manual(Profile::parse(&running).unwrap_or(Profile::Balanced))
        } else {
            Mode::Auto
        };
        self.apply(mode);
    }

    fn toggle_notifications(&mut self) {
        let enable = !self.controller.notifications_enabled();
        if let Err(e) = self.controller.set_notifications(enable) {
            tracing::warn!("failed to toggle notifications: {}", e);
        }
        self.controller.refresh();
    }
}

impl Tray for PowerProfileTray {
    fn id(&self) -> String {
        TRAY_ID.into()
    }

    fn category(&self) -> Category {
        Category::ApplicationStatus
    }

    fn status(&self) -> Status {
        Status::Active
    }

    fn title(&self) -> String {
        self.label()
    }

    fn icon_name(&self) -> String {
        self.icons.icon_name(&self.current().profile)
    }

    fn tool_tip(&self) -> ToolTip {
        let snapshot = self.current();
        let mode = if snapshot.auto {
            "auto mode"
        } else {
            "manual override"
        };
        ToolTip {
            title: self.label(),
            description: format!("{} ({})", profile::display_name(&snapshot.profile), mode),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let snapshot = self.current();

        let mut items: Vec<MenuItem<Self>> = vec![
            CheckmarkItem {
                label: "Auto Mode".into(),
                checked: snapshot.auto,
                activate: Box::new(|tray: &mut Self| tray.toggle_auto()),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
        ];

        for p in Profile::ALL {
            items.push(
                CheckmarkItem {
                    label: p.display_name().into(),
                    checked: !snapshot.auto && snapshot.profile == p.as_str(),
                    activate: Box::new(move |tray: &mut Self| tray.apply(Mode::Manual(p))),
                    ..Default::default()
                }
                .into(),
            );
        }

        items.extend([
            MenuItem::Separator,
            CheckmarkItem {
                label: "Notifications".into(),
                checked: snapshot.notify,
                activate: Box::new(|tray: &mut Self| tray.toggle_notifications()),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "Quit".into(),
                icon_name: "application-exit".into(),
                activate: Box::new(|tray: &mut Self| tray.quit.notify_one()),
                ..Default::default()
            }
            .into(),
        ]);

        items
    }
}

/// Owns the tray until the user quits
pub struct TrayManager {
    tray: PowerProfileTray,
    poll_interval: Duration,
    quit: Arc<Notify>,
}

impl TrayManager {
    pub fn new(
        controller: ProfileController,
        style: LabelStyle,
        icons: IconStrategy,
        poll_interval: Duration,
    ) -> Self {
        let quit = Arc::new(Notify::new());
        TrayManager {
            tray: PowerProfileTray::new(controller, style, icons, Arc::clone(&quit)),
            poll_interval,
            quit,
        }
    }

    /// Register the tray with the StatusNotifierItem host and poll until
    /// Quit or Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let TrayManager {
            tray,
            poll_interval,
            quit,
        } = self;

        tracing::info!("initial state: {}", tray.label());
        let handle = tray
            .spawn()
            .await
            .map_err(|e| Error::TrayUnavailable(e.to_string()))?;

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match handle.update(|tray: &mut PowerProfileTray| tray.poll()).await {
                        Some(true) => tracing::debug!("tray redrawn"),
                        Some(false) => {}
                        None => {
                            tracing::warn!("tray service stopped");
                            break;
                        }
                    }
                }
                _ = quit.notified() => {
                    tracing::info!("quit requested");
                    break;
                }
                result = &mut ctrl_c => {
                    if let Err(e) = result {
                        tracing::warn!("failed to listen for Ctrl-C: {}", e);
                    }
                    break;
                }
            }
        }

        handle.shutdown().await;
        Ok(())
    }
}
