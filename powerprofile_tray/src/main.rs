// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use powerprofile_tray::config::{self, Settings};
use powerprofile_tray::flags::StatePaths;
use powerprofile_tray::notifier::DesktopNotifier;
use powerprofile_tray::profile::{LabelStyle, Mode};
use powerprofile_tray::profile_controller::ProfileController;
use powerprofile_tray::profile_tool::PowerProfilesCtl;
use powerprofile_tray::tray_manager::{IconStrategy, TrayManager};
use powerprofile_tray::Error;

#[derive(Parser, Debug)]
#[command(name = "powerprofile-tray", version, about = "Power profile tray indicator")]
struct Cli {
    /// Settings file (default: ~/.config/powerprofile-tray/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the powerprofile.* flag files
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Seconds between state checks
    #[arg(long, value_name = "SECS", global = true)]
    poll_interval: Option<u64>,

    #[arg(long, value_enum, global = true)]
    label_style: Option<LabelStyle>,

    /// Command-line client of the profile daemon
    #[arg(long, value_name = "PROGRAM", global = true)]
    profile_tool: Option<String>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current label and exit
    Status,
    /// Switch mode once and exit
    Set {
        /// auto, power-saver, balanced or performance
        mode: Mode,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = match self.config.clone().or_else(|| config::config_file().ok()) {
            Some(path) => Settings::load_or_default(&path),
            None => Settings::default(),
        };

        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = Some(dir.clone());
        }
        if let Some(secs) = self.poll_interval {
            settings.poll_interval_secs = secs;
        }
        if let Some(style) = self.label_style {
            settings.label_style = style;
        }
        if let Some(tool) = &self.profile_tool {
            settings.profile_tool = tool.clone();
        }
        settings
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    let cache_dir = settings
        .resolve_cache_dir()
        .context("Cannot locate the cache directory")?;
    tracing::debug!("flag files in {}", cache_dir.display());

    let mut controller = ProfileController::new(
        StatePaths::in_dir(&cache_dir),
        PowerProfilesCtl::new(settings.profile_tool.clone()),
        DesktopNotifier::default(),
    );

    match cli.command {
        Some(Command::Status) => {
            let snapshot = controller.refresh();
            println!("{}", settings.label_style.render(&snapshot.profile, snapshot.auto));
        }
        Some(Command::Set { mode }) => {
            controller
                .set_state(mode)
                .with_context(|| format!("Failed to switch to {}", mode))?;
            let snapshot = controller.refresh();
            println!("{}", settings.label_style.render(&snapshot.profile, snapshot.auto));
        }
        None => {
            let icons = IconStrategy::detect(&config::data_dirs(), &settings.icon_name);
            TrayManager::new(
                controller,
                settings.label_style,
                icons,
                settings.poll_interval(),
            )
            .run()
            .await?;
        }
    }

    Ok(())
}

/// Exit status and stderr text for a failed run
fn failure_report(e: &anyhow::Error) -> (u8, String) {
    match e.downcast_ref::<Error>() {
        Some(Error::TrayUnavailable(reason)) => (
            1,
            format!(
                "powerprofile-tray needs a system tray (StatusNotifierItem host).\n\
                 On GNOME install and enable gnome-shell-extension-appindicator \
                 (Ubuntu/Debian/Fedora package: gnome-shell-extension-appindicator).\n\
                 KDE Plasma, Xfce (xfce4-statusnotifier-plugin) and waybar provide one already.\n\
                 Details: {}",
                reason
            ),
        ),
        _ => (1, format!("Error: {:#}", e)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (code, message) = failure_report(&e);
            eprintln!("{}", message);
            ExitCode::from(code)
        }
    }
}
