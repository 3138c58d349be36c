// src/profile.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Profile reported when neither the cache files nor the live query answer.
pub const DEFAULT_PROFILE: &str = "balanced";

/// Power profiles understood by power-profiles-daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    PowerSaver,
    Balanced,
    Performance,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::PowerSaver, Profile::Balanced, Profile::Performance];

    /// Identifier used by `powerprofilesctl` and the flag files
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::PowerSaver => "power-saver",
            Profile::Balanced => "balanced",
            Profile::Performance => "performance",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Profile::PowerSaver => "Power Saver",
            Profile::Balanced => "Balanced",
            Profile::Performance => "Performance",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Profile::PowerSaver => "🌙",
            Profile::Balanced => "⚙️",
            Profile::Performance => "⚡",
        }
    }

    /// Symbolic icon shipped by GNOME icon themes
    pub fn icon_name(self) -> &'static str {
        match self {
            Profile::PowerSaver => "power-profile-power-saver-symbolic",
            Profile::Balanced => "power-profile-balanced-symbolic",
            Profile::Performance => "power-profile-performance-symbolic",
        }
    }

    pub fn parse(id: &str) -> Option<Profile> {
        Profile::ALL.into_iter().find(|p| p.as_str() == id)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked for: follow the automation script, or pin a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Auto,
    Manual(Profile),
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Mode::Auto);
        }
        Profile::parse(s).map(Mode::Manual).ok_or_else(|| {
            format!("unknown mode '{s}', expected auto, power-saver, balanced or performance")
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Auto => f.write_str("auto"),
            Mode::Manual(profile) => profile.fmt(f),
        }
    }
}

/// How the tray label is rendered. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// "A: Balanced" / "M: Performance"
    #[default]
    Prefix,
    /// A single emoji per profile
    Glyph,
}

impl LabelStyle {
    pub fn render(self, profile: &str, auto: bool) -> String {
        match self {
            LabelStyle::Prefix => label_for(profile, auto),
            LabelStyle::Glyph => Profile::parse(profile)
                .map(Profile::glyph)
                .unwrap_or("❔")
                .to_string(),
        }
    }
}

/// Prefix-style label: mode letter followed by a readable profile name.
pub fn label_for(profile: &str, auto: bool) -> String {
    let prefix = if auto { "A" } else { "M" };
    format!("{}: {}", prefix, display_name(profile))
}

/// Human name for a profile id, title-casing ids we don't know.
pub fn display_name(profile: &str) -> String {
    match Profile::parse(profile) {
        Some(known) => known.display_name().to_string(),
        None => title_case(profile),
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}
