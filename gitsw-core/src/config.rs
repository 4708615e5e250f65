use crate::{paths, state::DEFAULT_WINDOW_SIZE};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_SEARCH_LABEL: &str = "search";
pub const DEFAULT_PINNED_PREFIX: &str = "★";

fn config_file() -> PathBuf {
    paths::config_dir().join("config.toml")
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of branches shown at once.
    #[serde(
        default = "Config::default_window_size",
        deserialize_with = "deserialize_window_size"
    )]
    pub window_size: usize,

    /// Label shown in front of the search input.
    #[serde(default = "Config::default_search_label")]
    pub search_label: String,

    /// Marker drawn before pinned branches.
    #[serde(default = "Config::default_pinned_prefix")]
    pub pinned_prefix: String,

    /// Prune stale remote-tracking branches before listing remote branches.
    #[serde(default)]
    pub prune_remote_branches: bool,

    /// Optional parts of the picker.
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: Self::default_window_size(),
            search_label: Self::default_search_label(),
            pinned_prefix: Self::default_pinned_prefix(),
            prune_remote_branches: false,
            features: FeaturesConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    fn default_window_size() -> usize {
        DEFAULT_WINDOW_SIZE
    }
    fn default_search_label() -> String {
        DEFAULT_SEARCH_LABEL.to_string()
    }
    fn default_pinned_prefix() -> String {
        DEFAULT_PINNED_PREFIX.to_string()
    }

    /// Blank labels fall back to their defaults.
    fn with_fallbacks(mut self) -> Self {
        if self.search_label.trim().is_empty() {
            self.search_label = Self::default_search_label();
        }
        if self.pinned_prefix.trim().is_empty() {
            self.pinned_prefix = Self::default_pinned_prefix();
        }
        self
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FeaturesConfig {
    /// Allow pinning and unpinning branches from the picker.
    #[serde(default = "default_true")]
    pub pinning: bool,
    /// Show the currently checked-out branch above the search line.
    #[serde(default = "default_true")]
    pub current_branch: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            pinning: true,
            current_branch: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn deserialize_window_size<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let size = usize::deserialize(deserializer)?;
    if size == 0 {
        return Err(serde::de::Error::custom(
            "invalid window_size 0: expected a positive number of rows",
        ));
    }
    Ok(size)
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Background of the selected row (default: "blue").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Foreground of the selected row (default: "white").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
    /// Search line color (default: "green").
    #[serde(
        default = "ThemeConfig::default_input",
        deserialize_with = "deserialize_color"
    )]
    pub input: ThemeColor,
    /// Checked-out branch line color (default: "magenta").
    #[serde(
        default = "ThemeConfig::default_current",
        deserialize_with = "deserialize_color"
    )]
    pub current: ThemeColor,
    /// Key labels in the instructions line (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
    /// Muted/dim text color (default: "dark_gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            highlight_fg: Self::default_highlight_fg(),
            input: Self::default_input(),
            current: Self::default_current(),
            hint: Self::default_hint(),
            muted: Self::default_muted(),
            error: Self::default_error(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::White)
    }
    fn default_input() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_current() -> ThemeColor {
        ThemeColor::Named(NamedColor::Magenta)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::DarkGray)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("dark_gray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        // Handle aliases not in the canonical list
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "dark_grey" | "darkgray" | "darkgrey" => "dark_gray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey, dark_gray) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config.with_fallbacks())
}

/// Load the config file, or the defaults when no file exists at the default
/// location. An explicit override must exist.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => path
            .to_str()
            .and_then(paths::expand_tilde)
            .unwrap_or_else(|| path.to_path_buf()),
        None => {
            let path = config_file();
            if !path.exists() {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            path
        }
    };
    if !config_file.exists() {
        anyhow::bail!("Config file not found at {}", config_file.display());
    }
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("invalid config in {}", config_file.display()))
}
