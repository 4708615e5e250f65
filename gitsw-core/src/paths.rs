use std::path::PathBuf;

pub const APP_NAME: &str = "gitsw";

/// Resolve an XDG base directory for gitsw on unix, falling back to
/// `~/<fallback>` when the variable is unset or empty.
#[cfg(unix)]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = std::env::var(var)
        && !dir.is_empty()
    {
        return PathBuf::from(dir).join(APP_NAME);
    }
    let mut path = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    for segment in fallback {
        path.push(segment);
    }
    path.join(APP_NAME)
}

/// Directory holding `config.toml`.
pub fn config_dir() -> PathBuf {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

/// Directory holding per-repository state (pins, last branch).
pub fn state_dir() -> PathBuf {
    #[cfg(unix)]
    {
        xdg_dir("XDG_STATE_HOME", &[".local", "state"])
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

/// Directory holding the log file.
pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        xdg_dir("XDG_CACHE_HOME", &[".cache"])
    }
    #[cfg(windows)]
    {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Returns `None` when the path starts with `~` but the home directory
/// cannot be determined. Non-tilde paths are always returned as-is.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if path == "~" {
        dirs::home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        Some(PathBuf::from(path))
    }
}
