// src/notifier.rs
use notify_rust::Notification;
use std::thread;

use crate::error::{Error, Result};

pub const NOTIFICATION_TITLE: &str = "Power Profile";

/// Desktop notification sink
pub trait Notifier: Send {
    fn notify(&self, title: &str, body: &str, icon: &str) -> Result<()>;
}

/// Sends notifications through the freedesktop notification service
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        DesktopNotifier {
            app_name: app_name.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        DesktopNotifier::new("powerprofile-tray")
    }
}

impl Notifier for DesktopNotifier {
    /// `Notification::show` blocks on its own D-Bus executor, which must not
    /// run on a tokio runtime thread, so the call gets a thread of its own.
    fn notify(&self, title: &str, body: &str, icon: &str) -> Result<()> {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(body)
            .icon(icon);

        let sender = thread::Builder::new()
            .name("powerprofile-notify".into())
            .spawn(move || {
                notification
                    .show()
                    .map(|_| ())
                    .map_err(|e| Error::Notify(e.to_string()))
            })
            .map_err(|e| Error::Notify(e.to_string()))?;

        sender
            .join()
            .unwrap_or_else(|_| Err(Error::Notify("notification thread panicked".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_outside_runtime() {
        // No session bus in CI gives an error, a desktop shows the popup
        let _ = DesktopNotifier::default().notify(
            NOTIFICATION_TITLE,
            "Balanced mode activated",
            "power-profile-balanced-symbolic",
        );
    }

    #[tokio::test]
    async fn test_notify_inside_runtime_does_not_panic() {
        let result = DesktopNotifier::default().notify(
            NOTIFICATION_TITLE,
            "Performance mode activated",
            "power-profile-performance-symbolic",
        );
        if let Err(e) = result {
            assert!(matches!(e, Error::Notify(_)));
        }
    }
}
