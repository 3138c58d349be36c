// examples/status_demo.rs
//! Prints what the tray would show, without registering a tray icon

use powerprofile_tray::config::{self, Settings};
use powerprofile_tray::flags::StatePaths;
use powerprofile_tray::notifier::DesktopNotifier;
use powerprofile_tray::profile::LabelStyle;
use powerprofile_tray::profile_controller::ProfileController;
use powerprofile_tray::profile_tool::PowerProfilesCtl;
use powerprofile_tray::tray_manager::IconStrategy;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load_or_default(&config::config_file()?);
    let cache_dir = settings.resolve_cache_dir()?;
    let paths = StatePaths::in_dir(&cache_dir);

    println!("=== Power Profile Status ===\n");
    println!("Flag files in {}", cache_dir.display());
    for (name, path) in [
        ("state", &paths.state),
        ("last", &paths.last),
        ("override", &paths.override_file),
        ("silent", &paths.silent),
    ] {
        let mark = if path.exists() { "present" } else { "absent" };
        println!("  {:<9} {}", name, mark);
    }

    let controller = ProfileController::new(
        paths,
        PowerProfilesCtl::new(settings.profile_tool.clone()),
        DesktopNotifier::default(),
    );
    let snapshot = controller.snapshot();
    let icons = IconStrategy::detect(&config::data_dirs(), &settings.icon_name);

    println!();
    println!("Profile:       {}", snapshot.profile);
    println!("Mode:          {}", if snapshot.auto { "auto" } else { "manual" });
    println!("Notifications: {}", if snapshot.notify { "on" } else { "off" });
    println!("Icon:          {}", icons.icon_name(&snapshot.profile));
    println!("Label:         {}", LabelStyle::Prefix.render(&snapshot.profile, snapshot.auto));
    println!("Glyph:         {}", LabelStyle::Glyph.render(&snapshot.profile, snapshot.auto));

    Ok(())
}
